//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::observer::ObserverPurpose;
use crate::state::PageState;
use tracing::debug;

use super::{
    carousel, dispatch, init, lazy_images, modal, reveal, scroll, sticky, UpdateResult,
};

/// Process a message and update state
/// Returns optional follow-up message and/or actions
pub fn update(state: &mut PageState, message: Message) -> UpdateResult {
    let mut result = match message {
        Message::Init => init::handle_init(state),

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Dom(event) => dispatch::dispatch_event(state, event),

        // ─────────────────────────────────────────────────────────
        // Viewport Messages
        // ─────────────────────────────────────────────────────────
        Message::Scroll { y } => scroll::handle_scroll_to(state, y),
        Message::ScrollBy { dy } => {
            let y = state.viewport.scroll_y + dy;
            scroll::handle_scroll_to(state, y)
        }
        Message::Resize { width, height } => scroll::handle_resize(state, width, height),
        Message::Frame => scroll::handle_frame(state),

        Message::Intersections(notifications) => {
            let mut result = UpdateResult::none();
            for notification in notifications {
                let entries = &notification.entries;
                let handled = match notification.purpose {
                    ObserverPurpose::StickyNav => sticky::handle_intersections(state, entries),
                    ObserverPurpose::SectionReveal => {
                        reveal::handle_intersections(state, notification.observer, entries)
                    }
                    ObserverPurpose::LazyImage => {
                        lazy_images::handle_intersections(state, notification.observer, entries)
                    }
                };
                result.merge(handled);
            }
            result
        }

        // ─────────────────────────────────────────────────────────
        // Programmatic Controller Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenModal => {
            modal::open(state);
            UpdateResult::none()
        }
        Message::CloseModal => {
            modal::close(state);
            UpdateResult::none()
        }
        Message::NextSlide => {
            carousel::next(state);
            UpdateResult::none()
        }
        Message::PreviousSlide => {
            carousel::previous(state);
            UpdateResult::none()
        }
        Message::GoToSlide(index) => {
            carousel::go_to(state, index);
            UpdateResult::none()
        }
    };

    deliver_intersections(state, &mut result);
    result
}

/// Evaluate observers after a viewport change and queue their notifications
/// as the follow-up message.
fn deliver_intersections(state: &mut PageState, result: &mut UpdateResult) {
    if result.message.is_some() {
        // leave the flag set; evaluated after the pending follow-up
        return;
    }
    if !state.take_viewport_dirty() {
        return;
    }

    let notifications = state.observers.evaluate(&state.document, &state.viewport);
    if notifications.is_empty() {
        return;
    }

    debug!(count = notifications.len(), "Observer notifications queued");
    result.message = Some(Message::Intersections(notifications));
}
