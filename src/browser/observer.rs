//! Intersection observers.
//!
//! An observer watches a list of target nodes against the viewport, grown or
//! shrunk by its root margin. [`ObserverRegistry::compute`] is run once per
//! processing pass, after layout; it reports an initial entry for every newly
//! observed target and afterwards only targets whose intersecting state
//! changed. Results are delivered as [`IntersectionBatch`] messages, so the
//! callbacks always run on a later pass than the scroll that caused them.

use std::collections::HashMap;

use serde::Deserialize;
use slotmap::{new_key_type, SlotMap};

use crate::css::margin::RootMargin;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::Region;

new_key_type! {
    /// Handle returned by [`ObserverRegistry::create`].
    pub struct ObserverId;
}

/// `IntersectionObserver` options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverOptions {
    /// Fraction of the target's area that must be inside the root.
    pub threshold: f64,
    /// Adjustment applied to the viewport before testing.
    #[serde(default)]
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// Options with the given threshold and no root margin.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: RootMargin::ZERO,
        }
    }

    /// Set the root margin (builder).
    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Whether a target with `ratio` of its area inside the root counts as
    /// intersecting.
    pub fn is_intersecting(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }
}

/// One observed target's state at delivery time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

/// The entries one observer delivers in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionBatch {
    pub observer: ObserverId,
    pub entries: Vec<IntersectionEntry>,
}

crate::impl_message!(IntersectionBatch);

#[derive(Debug)]
struct Observer {
    options: ObserverOptions,
    seq: u64,
    targets: Vec<NodeId>,
    /// Last delivered state per target. Absent until the first delivery.
    last: HashMap<NodeId, bool>,
}

/// All live observers.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observers: SlotMap<ObserverId, Observer>,
    next_seq: u64,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an observer with no targets.
    pub fn create(&mut self, options: ObserverOptions) -> ObserverId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.observers.insert(Observer {
            options,
            seq,
            targets: Vec::new(),
            last: HashMap::new(),
        });
        tracing::trace!(?id, "observer created");
        id
    }

    /// Start watching `target`. Observing a target twice is a no-op.
    ///
    /// Returns `false` if the observer was disconnected.
    pub fn observe(&mut self, id: ObserverId, target: NodeId) -> bool {
        let Some(observer) = self.observers.get_mut(id) else {
            return false;
        };
        if !observer.targets.contains(&target) {
            observer.targets.push(target);
        }
        true
    }

    /// Stop watching `target`.
    pub fn unobserve(&mut self, id: ObserverId, target: NodeId) {
        if let Some(observer) = self.observers.get_mut(id) {
            observer.targets.retain(|&t| t != target);
            observer.last.remove(&target);
        }
    }

    /// Drop the observer and all its targets. Idempotent.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let removed = self.observers.remove(id).is_some();
        if removed {
            tracing::trace!(?id, "observer disconnected");
        }
        removed
    }

    /// Whether the observer is still live.
    pub fn is_connected(&self, id: ObserverId) -> bool {
        self.observers.contains_key(id)
    }

    /// Number of targets the observer watches (zero once disconnected).
    pub fn target_count(&self, id: ObserverId) -> usize {
        self.observers.get(id).map_or(0, |o| o.targets.len())
    }

    /// Number of live observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether there are no live observers.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Test every target against `viewport` and collect the entries due for
    /// delivery, one batch per observer in creation order.
    ///
    /// Targets that are no longer part of the document count as not
    /// intersecting.
    pub fn compute(&mut self, dom: &Dom, viewport: Region) -> Vec<IntersectionBatch> {
        let mut order: Vec<(u64, ObserverId)> = self
            .observers
            .iter()
            .map(|(id, o)| (o.seq, id))
            .collect();
        order.sort_unstable();

        let mut batches = Vec::new();
        for (_, id) in order {
            let Some(observer) = self.observers.get_mut(id) else {
                continue;
            };
            let root = viewport.inflate(observer.options.root_margin.resolve(viewport));
            let mut entries = Vec::new();
            for &target in &observer.targets {
                let ratio = if dom.is_connected(target) {
                    dom.get(target).map_or(0.0, |d| d.region.visible_fraction(root))
                } else {
                    0.0
                };
                let is_intersecting = observer.options.is_intersecting(ratio);
                if observer.last.get(&target) == Some(&is_intersecting) {
                    continue;
                }
                observer.last.insert(target, is_intersecting);
                entries.push(IntersectionEntry {
                    target,
                    is_intersecting,
                    intersection_ratio: ratio,
                });
            }
            if !entries.is_empty() {
                batches.push(IntersectionBatch {
                    observer: id,
                    entries,
                });
            }
        }
        batches
    }
}
