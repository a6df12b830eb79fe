//! Modal dialog handlers

use tracing::{debug, info};

use crate::listeners::{Listener, ListenerTarget};
use crate::registry::Region;
use crate::state::{ModalState, PageState};
use pagekit_core::EventKind;

/// Wire open triggers, the close control, the overlay and the Escape key
pub fn init(state: &mut PageState) {
    let triggers = state.registry.lookup(Region::OpenModalTrigger).to_vec();
    for trigger in triggers {
        state
            .listeners
            .add(ListenerTarget::Element(trigger), EventKind::Click, Listener::OpenModal);
    }

    let closers = [Region::CloseModalTrigger, Region::Overlay]
        .into_iter()
        .filter_map(|region| state.registry.first(region))
        .collect::<Vec<_>>();
    for closer in closers {
        state
            .listeners
            .add(ListenerTarget::Element(closer), EventKind::Click, Listener::CloseModal);
    }

    state
        .listeners
        .add(ListenerTarget::Document, EventKind::KeyDown, Listener::ModalEscape);

    // a page may ship with the dialog already showing
    if let Some(modal) = state.registry.first(Region::Modal) {
        if !state.document.has_class(modal, &state.settings.classes.hidden) {
            state.modal = ModalState::Open;
        }
    }
}

pub fn open(state: &mut PageState) {
    let hidden = state.settings.classes.hidden.clone();
    for region in [Region::Modal, Region::Overlay] {
        if let Some(node) = state.registry.first(region) {
            state.document.remove_class(node, &hidden);
        }
    }

    if state.modal == ModalState::Open {
        debug!("Modal already open");
        return;
    }
    state.modal = ModalState::Open;
    info!("Modal opened");
}

pub fn close(state: &mut PageState) {
    let hidden = state.settings.classes.hidden.clone();
    for region in [Region::Modal, Region::Overlay] {
        if let Some(node) = state.registry.first(region) {
            state.document.add_class(node, &hidden);
        }
    }

    if state.modal == ModalState::Closed {
        debug!("Modal already closed");
        return;
    }
    state.modal = ModalState::Closed;
    info!("Modal closed");
}
