//! Engine - owns the page state and drives the message loop
//!
//! Hosts (the headless runner, tests) push `Message`s through the channel
//! or call `process_message` directly. After each message the engine diffs
//! page snapshots and broadcasts `EngineEvent`s.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::actions::FrameScheduler;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::state::{ModalState, PageSnapshot, PageState};
use pagekit_core::{Page, Result};

/// Orchestration engine for one page.
///
/// Encapsulates:
/// - TEA state management
/// - Message channel
/// - Animation frame scheduling
/// - Event broadcasting for external consumers
pub struct Engine {
    /// TEA page state (the Model)
    pub state: PageState,

    /// Sender half of the message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    frames: FrameScheduler,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create an engine for a page. Controllers are not wired until
    /// `Message::Init` is processed.
    pub fn new(page: Page, settings: Settings) -> Result<Self> {
        Ok(Self::from_state(PageState::new(page, settings)?))
    }

    /// Create an engine around prepared state
    pub fn from_state(state: PageState) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            frames: FrameScheduler::default(),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message (and its follow-ups) through the TEA
    /// update cycle, then emit events for what changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = self.state.snapshot();

        process::process_message(&mut self.state, msg, &self.msg_tx, &mut self.frames);

        let post = self.state.snapshot();
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Messages queued while draining (animation frames, simulated image
    /// loads) are processed too, so on return the page is at rest.
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Receive and process messages until a quit is requested
    pub async fn run(&mut self) {
        while !self.should_quit() {
            match self.msg_rx.recv().await {
                Some(msg) => self.process_message(msg),
                None => break,
            }
        }
        debug!("Engine loop finished");
    }

    /// Get a clone of the message sender for input sources
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.state.snapshot()
    }

    /// Announce shutdown to subscribers
    pub fn shutdown(&mut self) {
        info!("Engine shutting down");
        self.state.request_quit();
        self.emit(EngineEvent::Shutdown);
    }

    /// Emit EngineEvents for the differences between two snapshots
    fn emit_events(&self, pre: &PageSnapshot, post: &PageSnapshot) {
        if !pre.initialized && post.initialized {
            self.emit(EngineEvent::Initialized {
                slides: self.state.carousel.slide_count(),
            });
        }

        // a dialog already showing in the page is startup state, not an opening
        if pre.initialized {
            match (pre.modal, post.modal) {
                (ModalState::Closed, ModalState::Open) => self.emit(EngineEvent::ModalOpened),
                (ModalState::Open, ModalState::Closed) => self.emit(EngineEvent::ModalClosed),
                _ => {}
            }
        }

        if pre.cookie_banner && !post.cookie_banner {
            self.emit(EngineEvent::CookieDismissed);
        }

        if post.current_slide != pre.current_slide {
            if let Some(index) = post.current_slide {
                // the initial render of slide 0 is part of Initialized
                if pre.initialized {
                    self.emit(EngineEvent::SlideChanged { index });
                }
            }
        }

        if post.active_tab != pre.active_tab {
            if let Some(tab) = post.active_tab {
                self.emit(EngineEvent::TabSelected {
                    tab,
                    label: post.active_tab_label.clone(),
                });
            }
        }

        match (pre.nav_stuck, post.nav_stuck) {
            (false, true) => self.emit(EngineEvent::NavStuck),
            (true, false) => self.emit(EngineEvent::NavUnstuck),
            _ => {}
        }

        for &section in &post.revealed_sections {
            if !pre.revealed_sections.contains(&section) {
                self.emit(EngineEvent::SectionRevealed { section });
            }
        }

        for &image in &post.swapped_images {
            if !pre.swapped_images.contains(&image) {
                let src = self
                    .state
                    .document
                    .attr(image, "src")
                    .unwrap_or_default()
                    .to_string();
                self.emit(EngineEvent::ImageSourceSwapped { image, src });
            }
        }

        for &image in &post.loaded_images {
            if !pre.loaded_images.contains(&image) {
                self.emit(EngineEvent::ImageLoaded { image });
            }
        }

        let moved = (post.scroll_y - pre.scroll_y).abs() > f64::EPSILON;
        let settled = pre.scrolling && !post.scrolling;
        if !post.scrolling && (moved || settled) {
            self.emit(EngineEvent::Scrolled { y: post.scroll_y });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
