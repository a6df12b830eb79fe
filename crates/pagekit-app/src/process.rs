//! Message processing
//!
//! Runs a message and its follow-ups through the TEA update function and
//! hands the resulting actions to the action layer.

use tokio::sync::mpsc;

use crate::actions::{handle_action, FrameScheduler};
use crate::handler;
use crate::message::Message;
use crate::state::PageState;

/// Process a message through the TEA update function
pub fn process_message(
    state: &mut PageState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    frames: &mut FrameScheduler,
) {
    if matches!(message, Message::Frame) {
        frames.frame_delivered();
    }

    // Process message through TEA update loop
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        let simulate_load = state.settings.images.simulate_load;
        for action in result.actions {
            handle_action(action, msg_tx, frames, simulate_load);
        }

        msg = result.message;
    }
}
