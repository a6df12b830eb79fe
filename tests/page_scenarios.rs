//! End-to-end page scenarios: fixture + settings on disk, engine loop, headless session

use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use pagekit::headless::runner::Session;
use pagekit::headless::HeadlessEvent;
use pagekit_app::config::{load_settings, Settings};
use pagekit_app::{Engine, EngineEvent, Message, ModalState};
use pagekit_core::{load_page, DomEvent, Key};

const PAGE: &str = include_str!("../demos/page.toml");
const TOUR: &str = include_str!("../demos/tour.txt");

/// Write the demo page (and optionally a config file) into a temp dir
fn project(config: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("page.toml"), PAGE).unwrap();
    if let Some(config) = config {
        fs::create_dir_all(dir.path().join(".pagekit")).unwrap();
        fs::write(dir.path().join(".pagekit/config.toml"), config).unwrap();
    }
    dir
}

fn engine_in(dir: &Path) -> Engine {
    let page = load_page(&dir.join("page.toml")).unwrap();
    Engine::new(page, load_settings(dir)).unwrap()
}

fn session_in(dir: &Path) -> Session {
    let mut session = Session::new(engine_in(dir));
    session.start();
    session
}

fn run(session: &mut Session, script: &str) -> Vec<HeadlessEvent> {
    script
        .lines()
        .flat_map(|line| session.handle_line(line))
        .collect()
}

fn count(events: &[HeadlessEvent], name: &str) -> usize {
    events.iter().filter(|e| e.name() == name).count()
}

#[test]
fn test_tour_script_drives_every_controller() {
    let dir = project(None);
    let mut session = session_in(dir.path());

    let events = run(&mut session, TOUR);

    assert_eq!(count(&events, "error"), 0, "{:?}", events);
    assert_eq!(count(&events, "modal_opened"), 3);
    assert_eq!(count(&events, "modal_closed"), 3);
    assert_eq!(count(&events, "section_revealed"), 3);
    assert_eq!(count(&events, "image_source_swapped"), 2);
    assert_eq!(count(&events, "image_loaded"), 2);
    assert_eq!(count(&events, "tab_selected"), 2);
    assert_eq!(count(&events, "cookie_dismissed"), 1);
    assert_eq!(count(&events, "state"), 2);
    assert!(session.should_quit());

    let doc = &session.engine().state.document;
    let snapshot = session.engine().snapshot();
    assert_eq!(snapshot.modal, ModalState::Closed);
    assert_eq!(snapshot.current_slide, Some(3));
    assert_eq!(snapshot.active_dot, Some(3));
    assert_eq!(snapshot.active_tab, doc.by_id("tab-1"));
    assert!(!snapshot.cookie_banner);
    assert!(snapshot.nav_stuck);
    // the footer anchor jumps without animation
    assert_eq!(snapshot.scroll_y, 800.0);
    assert!(!snapshot.scrolling);
}

#[test]
fn test_settings_beside_page_are_applied() {
    let dir = project(Some(
        r#"
[scroll]
smooth_frames = 0

[cookie]
enabled = false
"#,
    ));
    let mut session = session_in(dir.path());

    let snapshot = session.engine().snapshot();
    assert!(!snapshot.cookie_banner);

    // no animation frames: the scroll lands immediately
    let events = run(&mut session, "click .btn--scroll-to");
    assert!(events.iter().any(|e| e.name() == "scrolled"));
    assert_eq!(session.engine().snapshot().scroll_y, 800.0);
}

#[test]
fn test_invalid_settings_fall_back_to_defaults() {
    let dir = project(Some("[scroll\nsmooth_frames = "));
    assert_eq!(load_settings(dir.path()), Settings::default());

    let mut session = session_in(dir.path());
    assert!(session.engine().snapshot().cookie_banner);
    run(&mut session, "click .btn--scroll-to");
    assert!(session.engine().snapshot().scrolling);
}

#[test]
fn test_manual_image_loads() {
    let dir = project(Some("[images]\nsimulate_load = false\n"));
    let mut session = session_in(dir.path());

    let events = run(&mut session, "scroll 500\nsettle");
    assert_eq!(count(&events, "image_source_swapped"), 2);
    assert_eq!(count(&events, "image_loaded"), 0);

    let events = run(&mut session, "load #img-digital");
    assert_eq!(count(&events, "image_loaded"), 1);
    let snapshot = session.engine().snapshot();
    assert_eq!(snapshot.loaded_images.len(), 1);
    assert_eq!(snapshot.swapped_images.len(), 2);
}

#[test]
fn test_missing_fixture_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_page(&dir.path().join("nope.toml")).unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_run_headless_rejects_missing_script() {
    let dir = project(None);
    let result = pagekit::run_headless(
        &dir.path().join("page.toml"),
        Some(&dir.path().join("missing.txt")),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_engine_loop_with_concurrent_host() {
    let dir = project(None);
    let mut engine = engine_in(dir.path());
    let mut events = engine.subscribe();
    let tx = engine.msg_sender();

    let next = engine.state.document.by_id("slider-right").unwrap();
    let host = tokio::spawn(async move {
        tx.send(Message::Init).await.unwrap();
        tx.send(Message::Dom(DomEvent::Click { target: next }))
            .await
            .unwrap();
        tx.send(Message::Dom(DomEvent::KeyDown {
            key: Key::ArrowRight,
        }))
        .await
        .unwrap();
        tx.send(Message::Quit).await.unwrap();
    });

    tokio::time::timeout(Duration::from_secs(2), engine.run())
        .await
        .unwrap();
    host.await.unwrap();

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    assert_eq!(
        received,
        vec![
            EngineEvent::Initialized { slides: 5 },
            EngineEvent::SlideChanged { index: 1 },
            EngineEvent::SlideChanged { index: 2 },
        ]
    );
}
