//! Section reveal - sections start hidden and are revealed once, permanently

use tracing::info;

use crate::observer::{IntersectionEntry, ObserverConfig, ObserverId, ObserverPurpose};
use crate::registry::Region;
use crate::state::PageState;

use super::UpdateResult;

pub fn init(state: &mut PageState) {
    let sections = state.registry.lookup(Region::Section).to_vec();
    if sections.is_empty() {
        return;
    }

    let threshold = state.settings.observers.reveal_threshold;
    let id = state
        .observers
        .create(ObserverPurpose::SectionReveal, ObserverConfig::new(0.0, threshold));

    let hidden = state.settings.classes.section_hidden.clone();
    for section in sections {
        state.document.add_class(section, &hidden);
        state.observers.observe(id, section);
    }
    state.page_observers.section_reveal = Some(id);
}

pub fn handle_intersections(
    state: &mut PageState,
    observer: ObserverId,
    entries: &[IntersectionEntry],
) -> UpdateResult {
    let hidden = state.settings.classes.section_hidden.clone();

    for entry in entries.iter().filter(|e| e.is_visible) {
        state.document.remove_class(entry.target, &hidden);
        state.observers.unobserve(observer, entry.target);
        info!("Section {} revealed", entry.target);
    }

    UpdateResult::none()
}
