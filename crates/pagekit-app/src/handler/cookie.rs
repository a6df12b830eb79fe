//! Cookie banner appended to the header at startup

use pagekit_core::{Element, EventKind, NodeId, Result};
use tracing::{debug, info, warn};

use crate::listeners::{Listener, ListenerTarget};
use crate::registry::Region;
use crate::state::PageState;

use super::EventContext;

pub const BANNER_CLASS: &str = "cookie-message";
pub const BUTTON_CLASS: &str = "btn--close-cookie";

pub fn init(state: &mut PageState) {
    if !state.settings.cookie.enabled {
        return;
    }
    let Some(header) = state.registry.first(Region::Header) else {
        debug!("Cookie banner skipped: no header");
        return;
    };

    if let Err(e) = insert_banner(state, header) {
        warn!("Failed to insert cookie banner: {}", e);
    }
}

fn insert_banner(state: &mut PageState, header: NodeId) -> Result<()> {
    let cookie = &state.settings.cookie;
    let banner = Element::new("div")
        .with_class(BANNER_CLASS)
        .with_text(cookie.message.as_str());
    let button = Element::new("button")
        .with_class("btn")
        .with_class(BUTTON_CLASS)
        .with_text(cookie.button_text.as_str());

    let banner = state.document.create_element(banner);
    let button = state.document.create_element(button);
    state.document.append_child(banner, button)?;
    state.document.append_child(header, banner)?;

    state.listeners.add(
        ListenerTarget::Element(button),
        EventKind::Click,
        Listener::DismissCookie,
    );
    state.cookie_banner = Some(banner);
    Ok(())
}

/// Close button click: the banner leaves the document and the button's
/// listener is dropped with it
pub fn dismiss(state: &mut PageState, button: ListenerTarget, ctx: &mut EventContext) {
    ctx.prevent_default();
    state
        .listeners
        .remove(button, EventKind::Click, &Listener::DismissCookie);
    let Some(banner) = state.cookie_banner.take() else {
        return;
    };
    match state.document.remove(banner) {
        Ok(()) => info!("Cookie banner dismissed"),
        Err(e) => warn!("Failed to remove cookie banner: {}", e),
    }
}
