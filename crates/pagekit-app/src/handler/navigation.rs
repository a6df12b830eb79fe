//! Scroll & navigation handlers
//!
//! Smooth scroll trigger, delegated nav link clicks, hover emphasis and the
//! default anchor navigation of unsuppressed clicks. Initialization also
//! wires the sticky nav, section reveal and lazy image observers.

use pagekit_core::{EventKind, NodeId};
use tracing::debug;

use crate::listeners::{Listener, ListenerTarget};
use crate::registry::Region;
use crate::state::{PageState, ScrollBehavior};

use super::{lazy_images, reveal, scroll, sticky, EventContext, UpdateResult};

/// Opacity restored when the pointer leaves a link
const FULL_OPACITY: f64 = 1.0;

pub fn init(state: &mut PageState) {
    if let Some(button) = state.registry.first(Region::ScrollTrigger) {
        state.listeners.add(
            ListenerTarget::Element(button),
            EventKind::Click,
            Listener::ScrollToTarget,
        );
    }

    if let Some(links) = state.registry.first(Region::NavLinks) {
        state.listeners.add(
            ListenerTarget::Element(links),
            EventKind::Click,
            Listener::NavLinkDelegate,
        );
    }

    if let Some(nav) = state.registry.first(Region::Nav) {
        let dim = state.settings.hover.dim_opacity;
        let target = ListenerTarget::Element(nav);
        state
            .listeners
            .add(target, EventKind::MouseOver, hover_listener(dim));
        state
            .listeners
            .add(target, EventKind::MouseOut, hover_listener(FULL_OPACITY));
    }

    sticky::init(state);
    reveal::init(state);
    lazy_images::init(state);
}

/// Hover handler factory: the returned listener applies `opacity`
fn hover_listener(opacity: f64) -> Listener {
    Listener::NavHover { opacity }
}

/// Scroll trigger click: smooth scroll to the fixed target section
pub fn handle_scroll_trigger(state: &mut PageState, ctx: &mut EventContext) -> UpdateResult {
    ctx.prevent_default();
    match state.registry.first(Region::ScrollTarget) {
        Some(section) => scroll::scroll_into_view(state, section, ScrollBehavior::Smooth),
        None => {
            debug!("Scroll target not on page");
            UpdateResult::none()
        }
    }
}

/// Delegated click on the nav links container
pub fn handle_nav_click(
    state: &mut PageState,
    target: NodeId,
    ctx: &mut EventContext,
) -> UpdateResult {
    if !state.document.matches(target, &state.markers.nav_link) {
        debug!("Click on {} is not a nav link", target);
        return UpdateResult::none();
    }
    ctx.prevent_default();

    let Some(section) = fragment_target(state, target) else {
        debug!("Nav link {} points at no section", target);
        return UpdateResult::none();
    };

    scroll::scroll_into_view(state, section, ScrollBehavior::Smooth)
}

/// Hover emphasis: every other link in the same nav and the logo get
/// `opacity`
pub fn handle_hover(state: &mut PageState, target: NodeId, opacity: f64) {
    let doc = &state.document;
    if !doc.matches(target, &state.markers.nav_link) {
        return;
    }
    let Some(nav) = doc.closest(target, state.markers.selector(Region::Nav)) else {
        return;
    };

    let mut dimmed: Vec<NodeId> = doc
        .query_within(nav, &state.markers.nav_link)
        .into_iter()
        .filter(|&link| link != target)
        .collect();
    dimmed.extend(doc.query_within(nav, state.markers.selector(Region::NavLogo)));

    let value = opacity.to_string();
    for node in dimmed {
        state.document.set_style(node, "opacity", value.as_str());
    }
}

/// Default action of a click: an anchor with a `#fragment` href jumps to
/// the named element
pub fn follow_anchor(state: &mut PageState, target: NodeId) {
    let anchor = state
        .document
        .ancestors(target)
        .find(|&n| state.document.element(n).is_some_and(|e| e.tag == "a"));
    let Some(anchor) = anchor else {
        return;
    };

    if let Some(section) = fragment_target(state, anchor) {
        debug!("Default navigation from {} to {}", anchor, section);
        scroll::scroll_into_view(state, section, ScrollBehavior::Instant);
    }
}

/// Element named by a link's `href="#id"`
fn fragment_target(state: &PageState, link: NodeId) -> Option<NodeId> {
    let href = state.document.attr(link, "href")?;
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    state.document.by_id(id)
}
