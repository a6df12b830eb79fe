//! Tests for handler module

use super::*;
use crate::config::Settings;
use crate::message::Message;
use crate::registry::{Region, StaticRegistry};
use crate::state::{ModalState, PageState};
use pagekit_core::{parse_page, DomEvent, Key, NodeId};

const PAGE: &str = include_str!("../../../../demos/page.toml");

fn page_state(settings: Settings) -> PageState {
    PageState::new(parse_page(PAGE).unwrap(), settings).unwrap()
}

/// Run a message and its follow-ups; returns every action produced
fn run(state: &mut PageState, msg: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut next = Some(msg);
    while let Some(m) = next {
        let result = update(state, m);
        actions.extend(result.actions);
        next = result.message;
    }
    actions
}

fn initialized() -> PageState {
    let mut state = page_state(Settings::default());
    run(&mut state, Message::Init);
    state
}

fn node(state: &PageState, id: &str) -> NodeId {
    state
        .document
        .by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}

fn click(state: &mut PageState, id: &str) -> Vec<UpdateAction> {
    let target = node(state, id);
    run(state, Message::Dom(DomEvent::Click { target }))
}

fn key(state: &mut PageState, key: Key) {
    run(state, Message::Dom(DomEvent::KeyDown { key }));
}

fn finish_scroll(state: &mut PageState) {
    let mut frames = 0;
    while state.is_scrolling() {
        run(state, Message::Frame);
        frames += 1;
        assert!(frames <= 1000, "smooth scroll never finished");
    }
}

fn dots(state: &PageState) -> Vec<NodeId> {
    let container = node(state, "dots");
    state.document.children(container).to_vec()
}

fn active_dots(state: &PageState) -> Vec<usize> {
    dots(state)
        .into_iter()
        .enumerate()
        .filter(|(_, d)| state.document.has_class(*d, "dots__dot--active"))
        .map(|(i, _)| i)
        .collect()
}

fn slide_transforms(state: &PageState) -> Vec<String> {
    state
        .registry
        .lookup(Region::Slide)
        .iter()
        .map(|&s| state.document.style(s, "transform").unwrap_or("").to_string())
        .collect()
}

fn is_active_tab(state: &PageState, id: &str) -> bool {
    state
        .document
        .has_class(node(state, id), "operations__tab--active")
}

fn is_active_panel(state: &PageState, id: &str) -> bool {
    state
        .document
        .has_class(node(state, id), "operations__content--active")
}

// ─────────────────────────────────────────────────────────
// Initialization
// ─────────────────────────────────────────────────────────

#[test]
fn test_init_builds_one_dot_per_slide() {
    let state = initialized();

    let dots = dots(&state);
    assert_eq!(dots.len(), 5);
    for (i, dot) in dots.iter().enumerate() {
        assert!(state.document.has_class(*dot, "dots__dot"));
        assert_eq!(state.document.attr(*dot, "data-slide"), Some(i.to_string().as_str()));
    }
    assert_eq!(active_dots(&state), vec![0]);
    assert_eq!(
        slide_transforms(&state),
        vec![
            "translateX(0%)",
            "translateX(100%)",
            "translateX(200%)",
            "translateX(300%)",
            "translateX(400%)"
        ]
    );
}

#[test]
fn test_init_is_processed_once() {
    let mut state = initialized();
    run(&mut state, Message::Init);
    assert_eq!(dots(&state).len(), 5);
}

#[test]
fn test_init_hides_sections_out_of_view() {
    let state = initialized();
    for section in state.registry.lookup(Region::Section) {
        assert!(state.document.has_class(*section, "section--hidden"));
    }
}

#[test]
fn test_init_appends_cookie_banner_to_header() {
    let state = initialized();
    let banner = state.cookie_banner.expect("banner inserted");
    let header = state.registry.first(Region::Header).unwrap();

    assert_eq!(state.document.parent(banner), Some(header));
    assert!(state.document.has_class(banner, "cookie-message"));
    let button = state.document.children(banner)[0];
    assert!(state.document.has_class(button, "btn--close-cookie"));
    assert!(state.snapshot().cookie_banner);
}

#[test]
fn test_cookie_banner_can_be_disabled() {
    let mut settings = Settings::default();
    settings.cookie.enabled = false;
    let mut state = page_state(settings);
    run(&mut state, Message::Init);
    assert!(state.cookie_banner.is_none());
}

#[test]
fn test_nav_stuck_when_page_opens_scrolled() {
    let mut state = page_state(Settings::default());
    state.viewport.scroll_y = 1500.0;
    run(&mut state, Message::Init);

    let nav = state.registry.first(Region::Nav).unwrap();
    assert!(state.document.has_class(nav, "sticky"));
}

// ─────────────────────────────────────────────────────────
// Carousel
// ─────────────────────────────────────────────────────────

#[test]
fn test_five_next_clicks_wrap_to_first_slide() {
    let mut state = initialized();
    for _ in 0..5 {
        click(&mut state, "slider-right");
    }
    assert_eq!(state.carousel.current(), 0);
    assert_eq!(active_dots(&state), vec![0]);
}

#[test]
fn test_previous_from_first_slide_goes_to_last() {
    let mut state = initialized();
    click(&mut state, "slider-left");
    assert_eq!(state.carousel.current(), 4);
    assert_eq!(active_dots(&state), vec![4]);
    assert_eq!(slide_transforms(&state)[4], "translateX(0%)");
    assert_eq!(slide_transforms(&state)[0], "translateX(-400%)");
}

#[test]
fn test_dot_click_goes_to_slide() {
    let mut state = initialized();
    let dot = dots(&state)[3];
    run(&mut state, Message::Dom(DomEvent::Click { target: dot }));

    assert_eq!(state.carousel.current(), 3);
    assert_eq!(active_dots(&state), vec![3]);
    assert_eq!(
        slide_transforms(&state),
        vec![
            "translateX(-300%)",
            "translateX(-200%)",
            "translateX(-100%)",
            "translateX(0%)",
            "translateX(100%)"
        ]
    );
}

#[test]
fn test_click_on_dot_container_is_ignored() {
    let mut state = initialized();
    click(&mut state, "slider-right");
    click(&mut state, "dots");
    assert_eq!(state.carousel.current(), 1);
}

#[test]
fn test_arrow_keys_move_carousel() {
    let mut state = initialized();
    key(&mut state, Key::ArrowRight);
    key(&mut state, Key::ArrowRight);
    assert_eq!(state.carousel.current(), 2);
    key(&mut state, Key::ArrowLeft);
    assert_eq!(state.carousel.current(), 1);
    key(&mut state, Key::ArrowUp);
    assert_eq!(state.carousel.current(), 1);
}

#[test]
fn test_go_to_out_of_range_leaves_state() {
    let mut state = initialized();
    run(&mut state, Message::GoToSlide(2));
    let before = slide_transforms(&state);

    run(&mut state, Message::GoToSlide(5));
    run(&mut state, Message::GoToSlide(usize::MAX));

    assert_eq!(state.carousel.current(), 2);
    assert_eq!(slide_transforms(&state), before);
    assert_eq!(active_dots(&state), vec![2]);
}

#[test]
fn test_exactly_one_dot_active_after_every_operation() {
    let mut state = initialized();
    let ops = [
        Message::NextSlide,
        Message::GoToSlide(4),
        Message::NextSlide,
        Message::PreviousSlide,
        Message::PreviousSlide,
        Message::GoToSlide(9),
        Message::GoToSlide(1),
    ];
    for op in ops {
        run(&mut state, op);
        assert_eq!(active_dots(&state), vec![state.carousel.current()]);
        let zero = slide_transforms(&state)
            .iter()
            .position(|t| t == "translateX(0%)");
        assert_eq!(zero, Some(state.carousel.current()));
    }
}

#[test]
fn test_carousel_without_slides_is_inert() {
    let page = parse_page("[[element]]\ntag = \"div\"\nclass = [\"dots\"]\n").unwrap();
    let mut state = PageState::new(page, Settings::default()).unwrap();
    run(&mut state, Message::Init);
    run(&mut state, Message::NextSlide);
    key(&mut state, Key::ArrowLeft);
    assert!(state.carousel.is_empty());
    let container = state.registry.first(Region::DotContainer).unwrap();
    assert!(state.document.children(container).is_empty());
}

// ─────────────────────────────────────────────────────────
// Modal
// ─────────────────────────────────────────────────────────

fn modal_visible(state: &PageState) -> bool {
    !state.document.has_class(node(state, "modal"), "hidden")
        && !state.document.has_class(node(state, "overlay"), "hidden")
}

#[test]
fn test_open_then_close_with_each_trigger() {
    for close in ["close-modal", "overlay", "escape"] {
        let mut state = initialized();
        click(&mut state, "link-open-account");
        assert_eq!(state.modal, ModalState::Open);
        assert!(modal_visible(&state));

        if close == "escape" {
            key(&mut state, Key::Escape);
        } else {
            click(&mut state, close);
        }
        assert_eq!(state.modal, ModalState::Closed, "closed via {close}");
        assert!(state.document.has_class(node(&state, "modal"), "hidden"));
        assert!(state.document.has_class(node(&state, "overlay"), "hidden"));
    }
}

#[test]
fn test_escape_when_closed_is_noop() {
    let mut state = initialized();
    key(&mut state, Key::Escape);
    assert_eq!(state.modal, ModalState::Closed);
    click(&mut state, "close-modal");
    assert_eq!(state.modal, ModalState::Closed);
}

#[test]
fn test_other_keys_do_not_close_modal() {
    let mut state = initialized();
    run(&mut state, Message::OpenModal);
    key(&mut state, Key::Enter);
    key(&mut state, Key::Char('q'));
    assert_eq!(state.modal, ModalState::Open);
}

#[test]
fn test_opening_suppresses_default_navigation() {
    let mut state = initialized();
    let trigger = node(&state, "link-open-account");
    // a plain anchor (outside the nav link delegation) pointing at a section
    state.document.remove_class(trigger, "nav__link");
    state.document.set_attr(trigger, "href", "#section--2");

    let actions = click(&mut state, "link-open-account");
    assert!(actions.is_empty());
    assert_eq!(state.modal, ModalState::Open);
    assert_eq!(state.viewport.scroll_y, 0.0);
}

// ─────────────────────────────────────────────────────────
// Scroll & navigation
// ─────────────────────────────────────────────────────────

#[test]
fn test_scroll_button_smooth_scrolls_to_first_section() {
    let mut state = initialized();
    let actions = click(&mut state, "learn-more");

    assert_eq!(actions, vec![UpdateAction::RequestAnimationFrame]);
    assert!(state.is_scrolling());
    assert_eq!(state.viewport.scroll_y, 0.0);

    finish_scroll(&mut state);
    assert_eq!(state.viewport.scroll_y, 800.0);
}

#[test]
fn test_nav_link_scrolls_to_its_section() {
    let mut state = initialized();
    let actions = click(&mut state, "link-operations");

    // default jump suppressed: the viewport animates instead
    assert!(actions.contains(&UpdateAction::RequestAnimationFrame));
    assert_eq!(state.viewport.scroll_y, 0.0);

    finish_scroll(&mut state);
    assert_eq!(state.viewport.scroll_y, 1800.0);
}

#[test]
fn test_click_on_links_container_is_ignored() {
    let mut state = initialized();
    let links = state.registry.first(Region::NavLinks).unwrap();
    let actions = run(&mut state, Message::Dom(DomEvent::Click { target: links }));
    assert!(actions.is_empty());
    assert!(!state.is_scrolling());
    assert_eq!(state.viewport.scroll_y, 0.0);
}

#[test]
fn test_unsuppressed_anchor_click_jumps() {
    let mut state = initialized();
    let actions = click(&mut state, "footer-top");
    assert!(actions.iter().all(|a| *a != UpdateAction::RequestAnimationFrame));
    assert!(!state.is_scrolling());
    assert_eq!(state.viewport.scroll_y, 800.0);
}

#[test]
fn test_hover_dims_other_links_and_logo() {
    let mut state = initialized();
    let target = node(&state, "link-features");
    run(&mut state, Message::Dom(DomEvent::MouseOver { target }));

    for id in ["link-operations", "link-testimonials", "link-open-account", "logo"] {
        assert_eq!(state.document.style(node(&state, id), "opacity"), Some("0.5"), "{id}");
    }
    assert_eq!(state.document.style(target, "opacity"), None);

    run(&mut state, Message::Dom(DomEvent::MouseOut { target }));
    for id in ["link-operations", "link-testimonials", "link-open-account", "logo"] {
        assert_eq!(state.document.style(node(&state, id), "opacity"), Some("1"), "{id}");
    }
}

#[test]
fn test_hover_on_non_link_is_ignored() {
    let mut state = initialized();
    let logo = node(&state, "logo");
    run(&mut state, Message::Dom(DomEvent::MouseOver { target: logo }));
    assert_eq!(state.document.style(node(&state, "link-features"), "opacity"), None);
}

#[test]
fn test_hover_uses_configured_opacity() {
    let mut settings = Settings::default();
    settings.hover.dim_opacity = 0.25;
    let mut state = page_state(settings);
    run(&mut state, Message::Init);

    let target = node(&state, "link-features");
    run(&mut state, Message::Dom(DomEvent::MouseOver { target }));
    assert_eq!(state.document.style(node(&state, "logo"), "opacity"), Some("0.25"));
}

#[test]
fn test_sticky_nav_follows_header_visibility() {
    let mut state = initialized();
    let nav = state.registry.first(Region::Nav).unwrap();

    // header bottom (800) still touches the root shrunk by the nav height
    run(&mut state, Message::Scroll { y: 710.0 });
    assert!(!state.document.has_class(nav, "sticky"));

    run(&mut state, Message::Scroll { y: 711.0 });
    assert!(state.document.has_class(nav, "sticky"));

    run(&mut state, Message::ScrollBy { dy: 1000.0 });
    assert!(state.document.has_class(nav, "sticky"));

    run(&mut state, Message::Scroll { y: 0.0 });
    assert!(!state.document.has_class(nav, "sticky"));
}

#[test]
fn test_sticky_offset_includes_extra_margin() {
    let mut settings = Settings::default();
    settings.observers.sticky_extra_offset_px = 10.0;
    let mut state = page_state(settings);
    run(&mut state, Message::Init);
    let nav = state.registry.first(Region::Nav).unwrap();

    run(&mut state, Message::Scroll { y: 705.0 });
    assert!(state.document.has_class(nav, "sticky"));
}

#[test]
fn test_section_reveal_is_monotonic() {
    let mut state = initialized();
    let s1 = node(&state, "section--1");
    let s2 = node(&state, "section--2");
    let reveal = state.page_observers.section_reveal.unwrap();

    // 100px of section 1 visible: under 15%
    run(&mut state, Message::Scroll { y: 100.0 });
    assert!(state.document.has_class(s1, "section--hidden"));

    run(&mut state, Message::Scroll { y: 200.0 });
    assert!(!state.document.has_class(s1, "section--hidden"));
    assert!(!state.observers.is_observing(reveal, s1));
    assert!(state.document.has_class(s2, "section--hidden"));

    run(&mut state, Message::Scroll { y: 0.0 });
    run(&mut state, Message::Scroll { y: 3000.0 });
    run(&mut state, Message::Scroll { y: 0.0 });
    assert!(!state.document.has_class(s1, "section--hidden"));
}

#[test]
fn test_smooth_scroll_reveals_sections_on_the_way() {
    let mut state = initialized();
    click(&mut state, "link-testimonials");
    finish_scroll(&mut state);

    assert_eq!(state.viewport.scroll_y, 2600.0);
    for id in ["section--1", "section--2", "section--3"] {
        assert!(!state.document.has_class(node(&state, id), "section--hidden"), "{id}");
    }
}

#[test]
fn test_lazy_image_swaps_source_then_loads() {
    let mut state = initialized();
    let img = node(&state, "img-digital");
    let lazy = state.page_observers.lazy_images.unwrap();

    // 200px margin: the image top (1100) meets the root bottom at 100
    let actions = run(&mut state, Message::Scroll { y: 100.0 });
    assert_eq!(state.document.attr(img, "src"), Some("img/digital.jpg"));
    assert!(state.document.has_class(img, "lazy-img"));
    assert!(!state.observers.is_observing(lazy, img));
    assert_eq!(
        actions,
        vec![UpdateAction::FetchImage {
            image: img,
            src: "img/digital.jpg".to_string()
        }]
    );

    run(&mut state, Message::Dom(DomEvent::Load { target: img }));
    assert!(!state.document.has_class(img, "lazy-img"));

    // later scrolling never puts the placeholder back
    run(&mut state, Message::Scroll { y: 0.0 });
    run(&mut state, Message::Scroll { y: 100.0 });
    assert_eq!(state.document.attr(img, "src"), Some("img/digital.jpg"));
    assert!(!state.document.has_class(img, "lazy-img"));
}

#[test]
fn test_lazy_image_ignores_load_before_swap() {
    let mut state = initialized();
    let img = node(&state, "img-grow");
    run(&mut state, Message::Dom(DomEvent::Load { target: img }));
    assert!(state.document.has_class(img, "lazy-img"));
    assert_eq!(state.document.attr(img, "src"), Some("img/grow-lazy.jpg"));
}

// ─────────────────────────────────────────────────────────
// Tabs
// ─────────────────────────────────────────────────────────

#[test]
fn test_tab_selection_is_exclusive() {
    let mut state = initialized();
    click(&mut state, "tab-2");

    assert!(is_active_tab(&state, "tab-2"));
    assert!(!is_active_tab(&state, "tab-1"));
    assert!(!is_active_tab(&state, "tab-3"));
    assert!(is_active_panel(&state, "panel-2"));
    assert!(!is_active_panel(&state, "panel-1"));
    assert!(!is_active_panel(&state, "panel-3"));
}

#[test]
fn test_click_inside_tab_selects_it() {
    let mut state = initialized();
    click(&mut state, "tab-3");
    click(&mut state, "tab-1-label");
    assert!(is_active_tab(&state, "tab-1"));
    assert!(is_active_panel(&state, "panel-1"));
    assert!(!is_active_panel(&state, "panel-3"));
}

#[test]
fn test_click_on_tab_container_is_ignored() {
    let mut state = initialized();
    click(&mut state, "tab-3");
    let container = state.registry.first(Region::TabContainer).unwrap();
    run(&mut state, Message::Dom(DomEvent::Click { target: container }));
    assert!(is_active_tab(&state, "tab-3"));
    assert!(is_active_panel(&state, "panel-3"));
}

#[test]
fn test_tab_without_panel_still_activates() {
    let mut state = initialized();
    let tab = node(&state, "tab-2");
    state.document.set_attr(tab, "data-tab", "9");

    click(&mut state, "tab-2");
    assert!(is_active_tab(&state, "tab-2"));
    assert!(!is_active_tab(&state, "tab-1"));
    for panel in ["panel-1", "panel-2", "panel-3"] {
        assert!(!is_active_panel(&state, panel));
    }
}

// ─────────────────────────────────────────────────────────
// Cookie banner
// ─────────────────────────────────────────────────────────

#[test]
fn test_cookie_banner_dismissed() {
    let mut state = initialized();
    let banner = state.cookie_banner.unwrap();
    let button = state.document.children(banner)[0];

    run(&mut state, Message::Dom(DomEvent::Click { target: button }));
    assert!(!state.document.is_connected(banner));
    assert!(state.cookie_banner.is_none());

    // a second click on the detached button is harmless
    run(&mut state, Message::Dom(DomEvent::Click { target: button }));
}

#[test]
fn test_cookie_dismiss_drops_button_listener() {
    let mut state = initialized();
    let banner = state.cookie_banner.unwrap();
    let button = state.document.children(banner)[0];

    run(&mut state, Message::Dom(DomEvent::Click { target: button }));

    let target = crate::listeners::ListenerTarget::Element(button);
    assert!(state
        .listeners
        .take_for_dispatch(target, pagekit_core::EventKind::Click)
        .is_empty());
}

// ─────────────────────────────────────────────────────────
// Dispatch edge cases
// ─────────────────────────────────────────────────────────

#[test]
fn test_event_for_unknown_node_is_dropped() {
    let mut state = initialized();
    let mut other = pagekit_core::Document::new();
    let mut stray = other.root();
    for _ in 0..500 {
        stray = other.create_element(pagekit_core::Element::new("div"));
    }
    let actions = run(&mut state, Message::Dom(DomEvent::Click { target: stray }));
    assert!(actions.is_empty());
}

#[test]
fn test_events_before_init_do_nothing() {
    let mut state = page_state(Settings::default());
    let next = node(&state, "slider-right");
    run(&mut state, Message::Dom(DomEvent::Click { target: next }));
    key(&mut state, Key::ArrowRight);
    assert_eq!(state.carousel.current(), 0);
    assert!(slide_transforms(&state).iter().all(String::is_empty));
}

#[test]
fn test_quit_message_sets_quitting() {
    let mut state = initialized();
    assert!(!state.should_quit());
    run(&mut state, Message::Quit);
    assert!(state.should_quit());
}

#[test]
fn test_controllers_use_injected_registry() {
    let page = parse_page(PAGE).unwrap();
    let modal = page.document.by_id("modal").unwrap();
    let registry = StaticRegistry::new().with(Region::Modal, [modal]);
    let mut state =
        PageState::with_registry(page, Settings::default(), Box::new(registry)).unwrap();
    run(&mut state, Message::Init);

    // nothing else is wired: the carousel and the cookie banner are absent
    assert!(state.carousel.is_empty());
    assert!(state.cookie_banner.is_none());

    run(&mut state, Message::OpenModal);
    assert_eq!(state.modal, ModalState::Open);
    assert!(!state.document.has_class(modal, "hidden"));
    // overlay is not in the registry and is untouched
    assert!(state.document.has_class(node(&state, "overlay"), "hidden"));
}
