//! Boundary observers - viewport intersection subscriptions
//!
//! An observer watches a set of targets against the viewport, grown or
//! shrunk by its root margin. Whenever a target's visibility against the
//! observer's threshold changes (and once right after it starts being
//! observed) a notification is produced. Consumers that only care about the
//! first positive notification unobserve the target themselves.

use pagekit_core::{Document, NodeId, Rect, Viewport};
use serde::Serialize;

/// Handle to a registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObserverId(usize);

/// Controller a notification is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverPurpose {
    StickyNav,
    SectionReveal,
    LazyImage,
}

/// Observation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverConfig {
    /// Pixels added to (positive) or removed from (negative) every side of
    /// the viewport before intersecting
    pub root_margin: f64,
    /// Visible fraction required; `0.0` means any intersection, even an
    /// edge-adjacent one
    pub threshold: f64,
}

impl ObserverConfig {
    pub fn new(root_margin: f64, threshold: f64) -> Self {
        Self {
            root_margin,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }
}

/// Visibility of one target at notification time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_visible: bool,
    /// Fraction of the target's area inside the root
    pub ratio: f64,
}

/// Batch of entries delivered to one observer's controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObserverNotification {
    pub observer: ObserverId,
    pub purpose: ObserverPurpose,
    pub entries: Vec<IntersectionEntry>,
}

#[derive(Debug, Clone)]
struct Observed {
    target: NodeId,
    /// Last reported visibility; `None` until the first notification
    last: Option<bool>,
}

#[derive(Debug, Clone)]
struct Observer {
    purpose: ObserverPurpose,
    config: ObserverConfig,
    targets: Vec<Observed>,
}

/// All observers on the page
#[derive(Debug, Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Observer>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, purpose: ObserverPurpose, config: ObserverConfig) -> ObserverId {
        self.observers.push(Observer {
            purpose,
            config,
            targets: Vec::new(),
        });
        ObserverId(self.observers.len() - 1)
    }

    /// Start watching a target; the next evaluation reports its state
    pub fn observe(&mut self, id: ObserverId, target: NodeId) {
        if let Some(observer) = self.observers.get_mut(id.0) {
            if !observer.targets.iter().any(|o| o.target == target) {
                observer.targets.push(Observed { target, last: None });
            }
        }
    }

    pub fn unobserve(&mut self, id: ObserverId, target: NodeId) {
        if let Some(observer) = self.observers.get_mut(id.0) {
            observer.targets.retain(|o| o.target != target);
        }
    }

    pub fn is_observing(&self, id: ObserverId, target: NodeId) -> bool {
        self.observers
            .get(id.0)
            .is_some_and(|o| o.targets.iter().any(|t| t.target == target))
    }

    /// Compute notifications for every target whose visibility changed
    /// since it was last reported.
    pub fn evaluate(&mut self, document: &Document, viewport: &Viewport) -> Vec<ObserverNotification> {
        let mut notifications = Vec::new();

        for (index, observer) in self.observers.iter_mut().enumerate() {
            let root = viewport.rect().inflate(observer.config.root_margin);
            let mut entries = Vec::new();

            for observed in &mut observer.targets {
                let entry = intersect(document, observed.target, &root, observer.config.threshold);
                if observed.last != Some(entry.is_visible) {
                    observed.last = Some(entry.is_visible);
                    entries.push(entry);
                }
            }

            if !entries.is_empty() {
                notifications.push(ObserverNotification {
                    observer: ObserverId(index),
                    purpose: observer.purpose,
                    entries,
                });
            }
        }

        notifications
    }
}

fn intersect(document: &Document, target: NodeId, root: &Rect, threshold: f64) -> IntersectionEntry {
    let hidden = IntersectionEntry {
        target,
        is_visible: false,
        ratio: 0.0,
    };

    if !document.is_connected(target) {
        return hidden;
    }

    let rect = document.rect(target);
    let Some(overlap) = rect.intersection(root) else {
        return hidden;
    };

    let ratio = if rect.area() > 0.0 {
        overlap.area() / rect.area()
    } else {
        1.0
    };

    let is_visible = if threshold <= 0.0 {
        true
    } else {
        ratio >= threshold
    };

    IntersectionEntry {
        target,
        is_visible,
        ratio,
    }
}
