//! Event listener table
//!
//! Listeners are plain data: a [`Listener`] names the controller routine to
//! run, and parameterized routines carry their parameter in the variant
//! (see [`Listener::NavHover`]). Listeners attach either to an element or to
//! the document as a whole.

use std::collections::HashMap;

use pagekit_core::{EventKind, NodeId};

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Document,
    Element(NodeId),
}

/// Controller routine invoked for an event
#[derive(Debug, Clone, PartialEq)]
pub enum Listener {
    // Modal
    OpenModal,
    CloseModal,
    ModalEscape,

    // Scroll & navigation
    ScrollToTarget,
    NavLinkDelegate,
    /// Hover emphasis with the opacity to apply to the other links
    NavHover { opacity: f64 },

    // Carousel
    SlideNext,
    SlidePrevious,
    SlideKeys,
    DotDelegate,

    // Tabs
    TabDelegate,

    // Lazy images
    LazyImageLoaded,

    // Cookie banner
    DismissCookie,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    listener: Listener,
    once: bool,
}

/// Registered listeners keyed by target and event type
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    entries: HashMap<(ListenerTarget, EventKind), Vec<Entry>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: ListenerTarget, kind: EventKind, listener: Listener) {
        self.insert(target, kind, listener, false);
    }

    /// Register a listener that is removed after it first fires
    pub fn add_once(&mut self, target: ListenerTarget, kind: EventKind, listener: Listener) {
        self.insert(target, kind, listener, true);
    }

    fn insert(&mut self, target: ListenerTarget, kind: EventKind, listener: Listener, once: bool) {
        let list = self.entries.entry((target, kind)).or_default();
        // registering the same listener twice is a no-op
        if list.iter().any(|e| e.listener == listener) {
            return;
        }
        list.push(Entry { listener, once });
    }

    pub fn remove(&mut self, target: ListenerTarget, kind: EventKind, listener: &Listener) {
        if let Some(list) = self.entries.get_mut(&(target, kind)) {
            list.retain(|e| &e.listener != listener);
        }
    }

    /// Listeners to invoke for one propagation step, in registration order.
    /// One-shot listeners are removed as they are taken.
    pub fn take_for_dispatch(&mut self, target: ListenerTarget, kind: EventKind) -> Vec<Listener> {
        let Some(list) = self.entries.get_mut(&(target, kind)) else {
            return Vec::new();
        };
        let listeners = list.iter().map(|e| e.listener.clone()).collect();
        list.retain(|e| !e.once);
        listeners
    }
}
