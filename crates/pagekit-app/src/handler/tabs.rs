//! Tabbed component

use pagekit_core::{EventKind, NodeId, Selector};
use tracing::{debug, info};

use crate::listeners::{Listener, ListenerTarget};
use crate::registry::Region;
use crate::state::PageState;

use super::EventContext;

pub fn init(state: &mut PageState) {
    if let Some(container) = state.registry.first(Region::TabContainer) {
        state.listeners.add(
            ListenerTarget::Element(container),
            EventKind::Click,
            Listener::TabDelegate,
        );
    }
}

/// Delegated click on the tab container
pub fn handle_click(state: &mut PageState, target: NodeId, ctx: &mut EventContext) {
    ctx.prevent_default();

    let Some(tab) = state
        .document
        .closest(target, state.markers.selector(Region::Tab))
    else {
        debug!("Click on {} is not inside a tab", target);
        return;
    };

    let classes = state.settings.classes.clone();
    for t in state.registry.lookup(Region::Tab) {
        state.document.remove_class(*t, &classes.tab_active);
    }
    for panel in state.registry.lookup(Region::TabPanel) {
        state.document.remove_class(*panel, &classes.panel_active);
    }

    state.document.add_class(tab, &classes.tab_active);

    let label = state.document.data(tab, "tab").map(str::to_string);
    let panel = label.as_deref().and_then(|label| {
        let marker = Selector::class(&format!("{}{}", classes.panel_prefix, label));
        state.document.query(&marker)
    });

    match panel {
        Some(panel) => {
            state.document.add_class(panel, &classes.panel_active);
        }
        None => debug!("No content panel for tab {:?}", label),
    }
    info!("Tab {} selected", label.as_deref().unwrap_or("<unlabelled>"));
}
