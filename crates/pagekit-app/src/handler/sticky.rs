//! Sticky navigation - the nav is stuck while the header is out of view

use tracing::{debug, info};

use crate::observer::{IntersectionEntry, ObserverConfig, ObserverPurpose};
use crate::registry::Region;
use crate::state::PageState;

use super::UpdateResult;

pub fn init(state: &mut PageState) {
    let (Some(header), Some(nav)) = (
        state.registry.first(Region::Header),
        state.registry.first(Region::Nav),
    ) else {
        debug!("Sticky nav disabled: header or nav missing");
        return;
    };

    // shrink the root by the nav height so the switch happens as the nav
    // would start covering content
    let nav_height = state.document.rect(nav).height;
    let margin = -(nav_height + state.settings.observers.sticky_extra_offset_px);

    let id = state
        .observers
        .create(ObserverPurpose::StickyNav, ObserverConfig::new(margin, 0.0));
    state.observers.observe(id, header);
    state.page_observers.sticky_nav = Some(id);
}

pub fn handle_intersections(state: &mut PageState, entries: &[IntersectionEntry]) -> UpdateResult {
    let Some(nav) = state.registry.first(Region::Nav) else {
        return UpdateResult::none();
    };
    let sticky = state.settings.classes.sticky.clone();

    for entry in entries {
        if entry.is_visible {
            if state.document.remove_class(nav, &sticky) {
                info!("Navigation unstuck");
            }
        } else if state.document.add_class(nav, &sticky) {
            info!("Navigation stuck");
        }
    }

    UpdateResult::none()
}
