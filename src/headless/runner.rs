//! Headless mode runner - main event loop without a browser
//!
//! This module implements the headless event loop for pagekit. It feeds
//! line commands to the engine and emits JSON events to stdout.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tokio::sync::{broadcast, mpsc};

use pagekit_app::config::load_settings;
use pagekit_app::{Engine, EngineEvent, Message};
use pagekit_core::prelude::*;
use pagekit_core::{load_page, DomEvent};

use super::command::{parse_line, Command};
use super::HeadlessEvent;

/// Where commands come from
enum Input {
    Script(File),
    Stdin,
}

/// Run in headless mode - read commands, output JSON events
///
/// Settings are read from `.pagekit/config.toml` beside the page fixture.
/// When `script` is `None` commands are read from stdin.
pub async fn run_headless(page_path: &Path, script: Option<&Path>) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("pagekit starting in HEADLESS mode");
    info!("Page: {}", page_path.display());
    info!("═══════════════════════════════════════════════════════");

    let page = load_page(page_path)?;
    let base_path = page_path.parent().unwrap_or_else(|| Path::new("."));
    let settings = load_settings(base_path);

    let input = match script {
        Some(path) => {
            info!("Script: {}", path.display());
            Input::Script(File::open(path)?)
        }
        None => Input::Stdin,
    };

    let mut session = Session::new(Engine::new(page, settings)?);

    // Spawn headless-specific line reader
    let (line_tx, line_rx) = mpsc::channel::<String>(64);
    std::thread::spawn(move || {
        spawn_line_reader_blocking(input, line_tx);
    });

    emit_all(session.start());

    // Main event loop
    headless_event_loop(&mut session, line_rx).await;

    // Shutdown
    session.shutdown();

    info!("pagekit headless mode exiting");
    Ok(())
}

/// Main headless event loop
async fn headless_event_loop(session: &mut Session, mut lines: mpsc::Receiver<String>) {
    loop {
        // Check for shutdown
        if session.should_quit() {
            info!("Quit requested");
            break;
        }

        // Wait for next command line
        match lines.recv().await {
            Some(line) => emit_all(session.handle_line(&line)),
            None => {
                // Input exhausted: let running animations finish
                info!("Input closed");
                emit_all(session.settle());
                break;
            }
        }
    }
}

fn emit_all(events: Vec<HeadlessEvent>) {
    for event in events {
        event.emit();
    }
}

/// An engine plus the event subscription the runner reports from.
///
/// Every call returns the headless events it produced, in order, so the
/// same session drives stdout and tests alike.
pub struct Session {
    engine: Engine,
    events: broadcast::Receiver<EngineEvent>,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        let events = engine.subscribe();
        Self { engine, events }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn should_quit(&self) -> bool {
        self.engine.should_quit()
    }

    /// Wire the controllers
    pub fn start(&mut self) -> Vec<HeadlessEvent> {
        self.engine.process_message(Message::Init);
        self.collect()
    }

    /// Parse and execute one input line
    pub fn handle_line(&mut self, line: &str) -> Vec<HeadlessEvent> {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Rejected command {:?}: {}", line.trim(), e);
                vec![HeadlessEvent::error(e.to_string(), e.is_fatal())]
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Vec<HeadlessEvent> {
        let reply = self.apply(command);
        let mut out = self.collect();
        match reply {
            Ok(Some(event)) => out.push(event),
            Ok(None) => {}
            Err(e) => {
                warn!("Command failed: {}", e);
                out.push(HeadlessEvent::error(e.to_string(), e.is_fatal()));
            }
        }
        out
    }

    /// Process queued frames and image loads until the page is at rest
    pub fn settle(&mut self) -> Vec<HeadlessEvent> {
        let processed = self.engine.drain_pending_messages();
        debug!("Settled after {} queued messages", processed);
        self.collect()
    }

    pub fn shutdown(mut self) {
        self.engine.shutdown();
    }

    fn apply(&mut self, command: Command) -> Result<Option<HeadlessEvent>> {
        let document = &self.engine.state.document;
        let message = match command {
            Command::Click(target) => Message::Dom(DomEvent::Click {
                target: target.resolve(document)?,
            }),
            Command::Hover(target) => Message::Dom(DomEvent::MouseOver {
                target: target.resolve(document)?,
            }),
            Command::Unhover(target) => Message::Dom(DomEvent::MouseOut {
                target: target.resolve(document)?,
            }),
            Command::Load(target) => Message::Dom(DomEvent::Load {
                target: target.resolve(document)?,
            }),
            Command::Key(key) => Message::Dom(DomEvent::KeyDown { key }),
            Command::Scroll(y) => Message::Scroll { y },
            Command::ScrollBy(dy) => Message::ScrollBy { dy },
            Command::Resize { width, height } => Message::Resize { width, height },
            Command::Settle => {
                self.engine.drain_pending_messages();
                return Ok(None);
            }
            Command::Dump => return Ok(Some(HeadlessEvent::state(self.engine.snapshot()))),
            Command::Quit => Message::Quit,
        };

        self.engine.process_message(message);
        Ok(None)
    }

    /// Translate every engine event broadcast since the last call
    fn collect(&mut self) -> Vec<HeadlessEvent> {
        let mut out = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if let Some(event) =
                        HeadlessEvent::from_engine_event(&event, &self.engine.state.document)
                    {
                        out.push(event);
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("Headless event stream lagged, {} events dropped", n);
                }
                Err(_) => break,
            }
        }
        out
    }
}

/// Forward input lines to the runner (blocking version)
fn spawn_line_reader_blocking(input: Input, line_tx: mpsc::Sender<String>) {
    match input {
        Input::Script(file) => forward_lines(BufReader::new(file), &line_tx),
        Input::Stdin => forward_lines(std::io::stdin().lock(), &line_tx),
    }

    info!("Line reader exiting");
}

fn forward_lines(reader: impl BufRead, line_tx: &mpsc::Sender<String>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if line_tx.blocking_send(line).is_err() {
                    // runner is gone
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}
