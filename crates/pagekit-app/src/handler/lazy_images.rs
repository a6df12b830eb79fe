//! Lazy image loader
//!
//! Placeholder images swap in their real source when they come within the
//! pre-trigger margin of the viewport, and drop the placeholder class once
//! the host reports the image loaded.

use pagekit_core::{EventKind, NodeId};
use tracing::{debug, info};

use crate::listeners::{Listener, ListenerTarget};
use crate::observer::{IntersectionEntry, ObserverConfig, ObserverId, ObserverPurpose};
use crate::registry::Region;
use crate::state::PageState;

use super::{UpdateAction, UpdateResult};

pub fn init(state: &mut PageState) {
    let images = state.registry.lookup(Region::LazyImage).to_vec();
    if images.is_empty() {
        return;
    }

    let margin = state.settings.observers.lazy_root_margin_px;
    let id = state
        .observers
        .create(ObserverPurpose::LazyImage, ObserverConfig::new(margin, 0.0));
    for image in images {
        state.observers.observe(id, image);
    }
    state.page_observers.lazy_images = Some(id);
}

pub fn handle_intersections(
    state: &mut PageState,
    observer: ObserverId,
    entries: &[IntersectionEntry],
) -> UpdateResult {
    let mut result = UpdateResult::none();

    for entry in entries.iter().filter(|e| e.is_visible) {
        let image = entry.target;
        state.observers.unobserve(observer, image);

        let Some(src) = state.document.data(image, "src").map(str::to_string) else {
            debug!("Image {} has no real source", image);
            continue;
        };

        state.document.set_attr(image, "src", src.as_str());
        state.listeners.add_once(
            ListenerTarget::Element(image),
            EventKind::Load,
            Listener::LazyImageLoaded,
        );
        info!("Image {} source swapped to {}", image, src);

        result.merge(UpdateResult::action(UpdateAction::FetchImage { image, src }));
    }

    result
}

/// Host finished loading a swapped image
pub fn handle_loaded(state: &mut PageState, image: NodeId) {
    let placeholder = state.settings.classes.lazy_placeholder.clone();
    if state.document.remove_class(image, &placeholder) {
        info!("Image {} loaded", image);
    }
}
