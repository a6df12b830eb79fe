//! Headless mode - JSON event output for scripted page sessions
//!
//! The runner reads line commands (see [`command`]) from a script file or
//! stdin and writes structured JSON events to stdout, so a page session can
//! be driven and asserted on from shell scripts and tests.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"ready","slides":5,"elements":61,"timestamp":1704700001000}
//! {"event":"modal_opened","timestamp":1704700002000}
//! {"event":"section_revealed","section":{"node":19,"id":"section--1"},"timestamp":1704700003000}
//! ```

pub mod command;
pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use pagekit_app::{EngineEvent, PageSnapshot};
use pagekit_core::{Document, NodeId};

/// An element as reported to script consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRef {
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ElementRef {
    fn new(document: &Document, node: NodeId) -> Self {
        Self {
            node,
            id: document.element(node).and_then(|e| e.id.clone()),
        }
    }
}

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Controllers are wired and the page is interactive
    Ready {
        slides: usize,
        elements: usize,
        timestamp: i64,
    },

    ModalOpened { timestamp: i64 },

    ModalClosed { timestamp: i64 },

    SlideChanged { index: usize, timestamp: i64 },

    TabSelected {
        tab: ElementRef,
        label: Option<String>,
        timestamp: i64,
    },

    SectionRevealed { section: ElementRef, timestamp: i64 },

    ImageSourceSwapped {
        image: ElementRef,
        src: String,
        timestamp: i64,
    },

    ImageLoaded { image: ElementRef, timestamp: i64 },

    NavStuck { timestamp: i64 },

    NavUnstuck { timestamp: i64 },

    CookieDismissed { timestamp: i64 },

    /// Viewport came to rest
    Scrolled { y: f64, timestamp: i64 },

    /// Reply to `dump`
    State {
        #[serde(flatten)]
        snapshot: PageSnapshot,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        // Serialize to JSON
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Event type as it appears in the `event` field
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "ready",
            Self::ModalOpened { .. } => "modal_opened",
            Self::ModalClosed { .. } => "modal_closed",
            Self::SlideChanged { .. } => "slide_changed",
            Self::TabSelected { .. } => "tab_selected",
            Self::SectionRevealed { .. } => "section_revealed",
            Self::ImageSourceSwapped { .. } => "image_source_swapped",
            Self::ImageLoaded { .. } => "image_loaded",
            Self::NavStuck { .. } => "nav_stuck",
            Self::NavUnstuck { .. } => "nav_unstuck",
            Self::CookieDismissed { .. } => "cookie_dismissed",
            Self::Scrolled { .. } => "scrolled",
            Self::State { .. } => "state",
            Self::Error { .. } => "error",
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    /// Translate an engine event. Returns `None` for events with no
    /// script-facing counterpart.
    pub fn from_engine_event(event: &EngineEvent, document: &Document) -> Option<Self> {
        let timestamp = Self::now();
        let event = match event {
            EngineEvent::Initialized { slides } => Self::Ready {
                slides: *slides,
                // the document root is not a page element
                elements: document.len().saturating_sub(1),
                timestamp,
            },
            EngineEvent::ModalOpened => Self::ModalOpened { timestamp },
            EngineEvent::ModalClosed => Self::ModalClosed { timestamp },
            EngineEvent::SlideChanged { index } => Self::SlideChanged {
                index: *index,
                timestamp,
            },
            EngineEvent::TabSelected { tab, label } => Self::TabSelected {
                tab: ElementRef::new(document, *tab),
                label: label.clone(),
                timestamp,
            },
            EngineEvent::SectionRevealed { section } => Self::SectionRevealed {
                section: ElementRef::new(document, *section),
                timestamp,
            },
            EngineEvent::ImageSourceSwapped { image, src } => Self::ImageSourceSwapped {
                image: ElementRef::new(document, *image),
                src: src.clone(),
                timestamp,
            },
            EngineEvent::ImageLoaded { image } => Self::ImageLoaded {
                image: ElementRef::new(document, *image),
                timestamp,
            },
            EngineEvent::NavStuck => Self::NavStuck { timestamp },
            EngineEvent::NavUnstuck => Self::NavUnstuck { timestamp },
            EngineEvent::CookieDismissed => Self::CookieDismissed { timestamp },
            EngineEvent::Scrolled { y } => Self::Scrolled { y: *y, timestamp },
            EngineEvent::Shutdown => return None,
        };
        Some(event)
    }

    pub fn state(snapshot: PageSnapshot) -> Self {
        Self::State {
            snapshot,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_core::Element;

    fn document() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let mut section = Element::new("section").with_class("section");
        section.id = Some("section--1".to_string());
        let node = doc.create_element(section);
        doc.append_child(root, node).unwrap();
        (doc, node)
    }

    #[test]
    fn test_ready_serialization() {
        let (doc, _) = document();
        let event =
            HeadlessEvent::from_engine_event(&EngineEvent::Initialized { slides: 3 }, &doc)
                .unwrap();
        let json = serde_json::to_string(&event).expect("serialization failed");

        // Parse back to ensure valid JSON
        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "ready");
        assert_eq!(value["slides"], 3);
        assert_eq!(value["elements"], 1);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_section_revealed_serialization() {
        let (doc, node) = document();
        let event = HeadlessEvent::from_engine_event(
            &EngineEvent::SectionRevealed { section: node },
            &doc,
        )
        .unwrap();
        let json = serde_json::to_string(&event).expect("serialization failed");

        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "section_revealed");
        assert_eq!(value["section"]["node"], node.index());
        assert_eq!(value["section"]["id"], "section--1");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_element_without_id_omits_field() {
        let mut doc = Document::new();
        let root = doc.root();
        let img = doc.create_element(Element::new("img"));
        doc.append_child(root, img).unwrap();

        let event =
            HeadlessEvent::from_engine_event(&EngineEvent::ImageLoaded { image: img }, &doc)
                .unwrap();
        let value = serde_json::to_value(&event).expect("serialization failed");

        assert_eq!(value["event"], "image_loaded");
        assert!(value["image"].get("id").is_none());
    }

    #[test]
    fn test_error_serialization() {
        let event = HeadlessEvent::error("unknown command 'jump'".to_string(), false);
        let json = serde_json::to_string(&event).expect("serialization failed");

        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "unknown command 'jump'");
        assert_eq!(value["fatal"], false);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_shutdown_is_not_reported() {
        let (doc, _) = document();
        assert!(HeadlessEvent::from_engine_event(&EngineEvent::Shutdown, &doc).is_none());
    }

    #[test]
    fn test_name_matches_serialized_tag() {
        let (doc, node) = document();
        let events = [
            EngineEvent::ModalOpened,
            EngineEvent::SlideChanged { index: 2 },
            EngineEvent::TabSelected {
                tab: node,
                label: None,
            },
            EngineEvent::NavStuck,
            EngineEvent::Scrolled { y: 42.0 },
        ];
        for engine_event in &events {
            let event = HeadlessEvent::from_engine_event(engine_event, &doc).unwrap();
            let value = serde_json::to_value(&event).expect("serialization failed");
            assert_eq!(value["event"], event.name());
        }
    }
}
