//! Message types for the application (TEA pattern)

use crate::observer::ObserverNotification;
use pagekit_core::DomEvent;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Wire every controller to the page (processed once)
    Init,

    /// Input event dispatched by the host
    Dom(DomEvent),

    /// Request to stop the engine loop
    Quit,

    // ─────────────────────────────────────────────────────────
    // Viewport Messages
    // ─────────────────────────────────────────────────────────
    /// Host scrolled the viewport to an absolute offset
    Scroll { y: f64 },
    /// Host scrolled the viewport by a relative amount
    ScrollBy { dy: f64 },
    /// Host resized the viewport
    Resize { width: f64, height: f64 },
    /// Animation frame (advances smooth scrolling)
    Frame,

    /// Boundary observer notifications, pushed after a viewport change
    Intersections(Vec<ObserverNotification>),

    // ─────────────────────────────────────────────────────────
    // Programmatic Controller Messages
    // ─────────────────────────────────────────────────────────
    OpenModal,
    CloseModal,
    NextSlide,
    PreviousSlide,
    GoToSlide(usize),
}
