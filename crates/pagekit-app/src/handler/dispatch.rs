//! Event propagation
//!
//! A host event is delivered to the listeners on its target, then on each
//! ancestor, then on the document (for bubbling events on connected
//! elements). Listeners registered as one-shot are dropped as they fire.
//! After propagation an unsuppressed click performs the default anchor
//! navigation.

use pagekit_core::{DomEvent, EventKind, Key};
use tracing::warn;

use crate::listeners::{Listener, ListenerTarget};
use crate::state::{ModalState, PageState};

use super::{
    carousel, cookie, lazy_images, modal, navigation, tabs, EventContext, UpdateResult,
};

/// Deliver a host event to every listener on its propagation path
pub fn dispatch_event(state: &mut PageState, event: DomEvent) -> UpdateResult {
    if let Some(target) = event.target() {
        if let Err(e) = state.document.try_element(target) {
            warn!("Dropping {} event: {}", kind_name(event.kind()), e);
            return UpdateResult::none();
        }
    }

    let kind = event.kind();
    let path = propagation_path(state, &event);
    let mut ctx = EventContext::default();
    let mut result = UpdateResult::none();

    for current in path {
        for listener in state.listeners.take_for_dispatch(current, kind) {
            let handled = invoke(state, &listener, &event, current, &mut ctx);
            result.merge(handled);
        }
    }

    if let DomEvent::Click { target } = event {
        if !ctx.default_prevented() {
            navigation::follow_anchor(state, target);
        }
    }

    result
}

fn propagation_path(state: &PageState, event: &DomEvent) -> Vec<ListenerTarget> {
    let Some(target) = event.target() else {
        return vec![ListenerTarget::Document];
    };

    if !event.bubbles() {
        return vec![ListenerTarget::Element(target)];
    }

    let mut path: Vec<ListenerTarget> = state
        .document
        .ancestors(target)
        .map(ListenerTarget::Element)
        .collect();
    if state.document.is_connected(target) {
        path.push(ListenerTarget::Document);
    }
    path
}

fn invoke(
    state: &mut PageState,
    listener: &Listener,
    event: &DomEvent,
    current: ListenerTarget,
    ctx: &mut EventContext,
) -> UpdateResult {
    let target = event.target();

    match listener {
        Listener::OpenModal => {
            ctx.prevent_default();
            modal::open(state);
        }
        Listener::CloseModal => modal::close(state),
        Listener::ModalEscape => {
            if event.key() == Some(&Key::Escape) && state.modal == ModalState::Open {
                modal::close(state);
            }
        }

        Listener::ScrollToTarget => return navigation::handle_scroll_trigger(state, ctx),
        Listener::NavLinkDelegate => {
            if let Some(target) = target {
                return navigation::handle_nav_click(state, target, ctx);
            }
        }
        Listener::NavHover { opacity } => {
            if let Some(target) = target {
                navigation::handle_hover(state, target, *opacity);
            }
        }

        Listener::SlideNext => carousel::next(state),
        Listener::SlidePrevious => carousel::previous(state),
        Listener::SlideKeys => match event.key() {
            Some(Key::ArrowLeft) => carousel::previous(state),
            Some(Key::ArrowRight) => carousel::next(state),
            _ => {}
        },
        Listener::DotDelegate => {
            if let Some(target) = target {
                carousel::handle_dot_click(state, target);
            }
        }

        Listener::TabDelegate => {
            if let Some(target) = target {
                tabs::handle_click(state, target, ctx);
            }
        }

        Listener::LazyImageLoaded => {
            if let ListenerTarget::Element(image) = current {
                lazy_images::handle_loaded(state, image);
            }
        }

        Listener::DismissCookie => cookie::dismiss(state, current, ctx),
    }

    UpdateResult::none()
}

/// Kind names for diagnostics
pub(crate) fn kind_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Click => "click",
        EventKind::KeyDown => "keydown",
        EventKind::MouseOver => "mouseover",
        EventKind::MouseOut => "mouseout",
        EventKind::Load => "load",
    }
}
