//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use pagekit_core::NodeId;

/// Observable page changes.
///
/// Derived by comparing page snapshots before and after a message (and its
/// follow-ups) was processed, so subscribers see a consistent view.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Every controller has been wired
    Initialized { slides: usize },

    // ─────────────────────────────────────────────────────────
    // Controllers
    // ─────────────────────────────────────────────────────────
    /// Dialog state changes after initialization; a dialog already showing
    /// in the page is reported by neither
    ModalOpened,
    ModalClosed,

    /// The carousel moved to another slide
    SlideChanged { index: usize },

    /// A tab became the active one
    TabSelected { tab: NodeId, label: Option<String> },

    /// A section lost its hidden marker (never reverts)
    SectionRevealed { section: NodeId },

    /// A placeholder image got its real source
    ImageSourceSwapped { image: NodeId, src: String },

    /// A swapped image finished loading and lost its placeholder class
    ImageLoaded { image: NodeId },

    NavStuck,
    NavUnstuck,

    CookieDismissed,

    // ─────────────────────────────────────────────────────────
    // Viewport
    // ─────────────────────────────────────────────────────────
    /// Viewport came to rest at a new offset
    Scrolled { y: f64 },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "initialized",
            Self::ModalOpened => "modal_opened",
            Self::ModalClosed => "modal_closed",
            Self::SlideChanged { .. } => "slide_changed",
            Self::TabSelected { .. } => "tab_selected",
            Self::SectionRevealed { .. } => "section_revealed",
            Self::ImageSourceSwapped { .. } => "image_source_swapped",
            Self::ImageLoaded { .. } => "image_loaded",
            Self::NavStuck => "nav_stuck",
            Self::NavUnstuck => "nav_unstuck",
            Self::CookieDismissed => "cookie_dismissed",
            Self::Scrolled { .. } => "scrolled",
            Self::Shutdown => "shutdown",
        }
    }
}
