//! Action handlers: the engine side of `UpdateAction`

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::handler::UpdateAction;
use crate::message::Message;
use pagekit_core::DomEvent;

/// Loop-owned bookkeeping for actions
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    /// A frame message has been taken off the queue
    pub fn frame_delivered(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Queue a frame unless one is already queued
    fn schedule(&mut self, msg_tx: &mpsc::Sender<Message>) {
        if self.pending {
            return;
        }
        match msg_tx.try_send(Message::Frame) {
            Ok(()) => self.pending = true,
            Err(e) => warn!("Failed to schedule animation frame: {}", e),
        }
    }
}

/// Execute an action returned by the update function
pub fn handle_action(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    frames: &mut FrameScheduler,
    simulate_load: bool,
) {
    match action {
        UpdateAction::RequestAnimationFrame => frames.schedule(msg_tx),

        UpdateAction::FetchImage { image, src } => {
            if !simulate_load {
                debug!("Image {} ({}) awaits a host load event", image, src);
                return;
            }
            // the simulated host completes the fetch immediately
            if let Err(e) = msg_tx.try_send(Message::Dom(DomEvent::Load { target: image })) {
                warn!("Failed to queue load of {}: {}", image, e);
            }
        }
    }
}
