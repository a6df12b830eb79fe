//! Page initialization - wires every controller once

use tracing::{debug, info};

use crate::state::PageState;

use super::{carousel, cookie, modal, navigation, tabs, UpdateResult};

pub fn handle_init(state: &mut PageState) -> UpdateResult {
    if state.is_initialized() {
        debug!("Page already initialized");
        return UpdateResult::none();
    }

    modal::init(state);
    navigation::init(state);
    tabs::init(state);
    carousel::init(state);
    cookie::init(state);

    state.mark_initialized();
    // first evaluation reports every observed target
    state.mark_viewport_dirty();

    info!(
        slides = state.carousel.slide_count(),
        "Page initialized"
    );
    UpdateResult::none()
}
