//! Scroll message handlers
//!
//! Handles host scrolling, viewport resizes and frame-driven smooth scroll
//! animation. Every viewport change marks observers for re-evaluation.

use pagekit_core::NodeId;
use tracing::{debug, warn};

use crate::state::{PageState, ScrollAnimation, ScrollBehavior};

use super::{UpdateAction, UpdateResult};

/// Handle a host scroll to an absolute offset. Cancels any smooth scroll.
pub fn handle_scroll_to(state: &mut PageState, y: f64) -> UpdateResult {
    if state.scroll_animation.take().is_some() {
        debug!("Host scroll cancelled smooth scroll");
    }
    state.set_scroll(y);
    UpdateResult::none()
}

/// Handle a viewport resize
pub fn handle_resize(state: &mut PageState, width: f64, height: f64) -> UpdateResult {
    if width <= 0.0 || height <= 0.0 {
        warn!("Ignoring resize to {}x{}", width, height);
        return UpdateResult::none();
    }

    state.viewport.width = width;
    state.viewport.height = height;
    // a taller viewport may pull the offset back into range
    let y = state.viewport.scroll_y;
    state.set_scroll(y);
    state.mark_viewport_dirty();
    UpdateResult::none()
}

/// Advance the running smooth scroll by one frame
pub fn handle_frame(state: &mut PageState) -> UpdateResult {
    let Some(mut animation) = state.scroll_animation.take() else {
        return UpdateResult::none();
    };

    let y = animation.advance();
    state.set_scroll(y);

    if animation.is_done() {
        debug!(y = state.viewport.scroll_y, "Smooth scroll finished");
        return UpdateResult::none();
    }

    state.scroll_animation = Some(animation);
    UpdateResult::action(UpdateAction::RequestAnimationFrame)
}

/// Scroll the viewport so the element's top edge sits at the top
pub fn scroll_into_view(
    state: &mut PageState,
    node: NodeId,
    behavior: ScrollBehavior,
) -> UpdateResult {
    let top = state.document.rect(node).y;
    scroll_to(state, top, behavior)
}

/// Scroll the viewport to an absolute offset
pub fn scroll_to(state: &mut PageState, y: f64, behavior: ScrollBehavior) -> UpdateResult {
    let target = state.viewport.clamp_scroll(y, state.document.height());
    let frames = state.settings.scroll.smooth_frames;

    if behavior == ScrollBehavior::Instant || frames == 0 {
        state.scroll_animation = None;
        state.set_scroll(target);
        return UpdateResult::none();
    }

    if (target - state.viewport.scroll_y).abs() < f64::EPSILON {
        state.scroll_animation = None;
        return UpdateResult::none();
    }

    let restarting = state.scroll_animation.is_some();
    state.scroll_animation = Some(ScrollAnimation::new(
        state.viewport.scroll_y,
        target,
        frames,
    ));
    debug!(from = state.viewport.scroll_y, to = target, frames, "Smooth scroll started");

    if restarting {
        // a frame is already scheduled for the previous animation
        UpdateResult::none()
    } else {
        UpdateResult::action(UpdateAction::RequestAnimationFrame)
    }
}
