//! Handler module - TEA update function and controller handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `dispatch`: Event propagation through the listener table
//! - `init`: One-time wiring of every controller
//! - `modal`: Modal dialog open/close
//! - `navigation`: Smooth scroll trigger, delegated nav links, hover emphasis
//! - `sticky`: Sticky navigation observer
//! - `reveal`: Section reveal observer
//! - `lazy_images`: Lazy image loader
//! - `carousel`: Slide carousel and indicator dots
//! - `tabs`: Tabbed component
//! - `cookie`: Cookie banner
//! - `scroll`: Viewport scroll, resize and smooth scroll animation

pub(crate) mod carousel;
pub(crate) mod cookie;
pub(crate) mod dispatch;
pub(crate) mod init;
pub(crate) mod lazy_images;
pub(crate) mod modal;
pub(crate) mod navigation;
pub(crate) mod reveal;
pub(crate) mod scroll;
pub(crate) mod sticky;
pub(crate) mod tabs;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use crate::message::Message;
use pagekit_core::NodeId;

// Re-export main entry point
pub use update::update;

/// Actions that the engine loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Schedule a `Message::Frame` (smooth scroll in progress)
    RequestAnimationFrame,

    /// The host should fetch an image; it reports completion with a
    /// `load` event on the element
    FetchImage { image: NodeId, src: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the engine loop to perform, in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            actions: Vec::new(),
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            actions: vec![action],
        }
    }

    /// Fold another result into this one. Actions accumulate; the first
    /// follow-up message wins.
    pub fn merge(&mut self, other: UpdateResult) {
        if self.message.is_none() {
            self.message = other.message;
        }
        for action in other.actions {
            if !self.actions.contains(&action) {
                self.actions.push(action);
            }
        }
    }
}

/// Per-dispatch event context shared by every listener on the
/// propagation path
#[derive(Debug, Default)]
pub struct EventContext {
    default_prevented: bool,
}

impl EventContext {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
