//! Progressive reveal: mark items visible the first time they scroll into view.
//!
//! A [`RevealController`] owns one intersection observer and a growing set
//! of visible indices. Indices are handed out in registration order. Entering
//! the viewport adds an index; leaving it does nothing, so a card animates in
//! exactly once.

use std::collections::{BTreeSet, HashMap};

use super::{DomPatch, PatchQueue, REVEALED};
use crate::browser::observer::{IntersectionBatch, ObserverId, ObserverOptions, ObserverRegistry};
use crate::dom::node::NodeId;
use crate::reactive::{batch, create_effect, create_signal, EffectId, ReadSignal, WriteSignal};

/// Viewport-driven, one-way visibility tracker for a list of items.
#[derive(Debug)]
pub struct RevealController {
    observer: Option<ObserverId>,
    items: Vec<NodeId>,
    index_of: HashMap<NodeId, usize>,
    visible: ReadSignal<BTreeSet<usize>>,
    set_visible: WriteSignal<BTreeSet<usize>>,
}

impl RevealController {
    /// Create a controller backed by a new observer.
    pub fn new(observers: &mut ObserverRegistry, options: ObserverOptions) -> Self {
        let mut controller = Self::unobserved();
        controller.observer = Some(observers.create(options));
        controller
    }

    /// A controller with no observer. Items are only revealed through
    /// [`reveal`](Self::reveal).
    pub fn unobserved() -> Self {
        let (visible, set_visible) = create_signal(BTreeSet::new());
        Self {
            observer: None,
            items: Vec::new(),
            index_of: HashMap::new(),
            visible,
            set_visible,
        }
    }

    /// Track `handle` and return its index.
    ///
    /// Registering the same handle again returns the index it already has
    /// and does not observe it twice.
    pub fn register(&mut self, observers: &mut ObserverRegistry, handle: NodeId) -> usize {
        if let Some(&index) = self.index_of.get(&handle) {
            return index;
        }
        let index = self.items.len();
        self.items.push(handle);
        self.index_of.insert(handle, index);
        if let Some(observer) = self.observer {
            observers.observe(observer, handle);
        }
        index
    }

    /// Whether the item at `index` has been revealed.
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.with(|set| set.contains(&index))
    }

    /// The visible set as a signal, for effects that render it.
    pub fn visible(&self) -> ReadSignal<BTreeSet<usize>> {
        self.visible.clone()
    }

    /// Number of revealed items.
    pub fn visible_count(&self) -> usize {
        self.visible.with_untracked(BTreeSet::len)
    }

    /// The index of a registered handle.
    pub fn index_of(&self, handle: NodeId) -> Option<usize> {
        self.index_of.get(&handle).copied()
    }

    /// The handle at `index`.
    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    /// Whether `batch` was produced by this controller's observer.
    pub fn owns(&self, batch: &IntersectionBatch) -> bool {
        self.observer == Some(batch.observer)
    }

    /// Apply an intersection delivery. Returns how many items became visible.
    ///
    /// Batches from other observers, and every batch after teardown, are
    /// ignored.
    pub fn handle_batch(&self, delivery: &IntersectionBatch) -> usize {
        if !self.owns(delivery) {
            return 0;
        }
        batch(|| {
            delivery
                .entries
                .iter()
                .filter(|entry| entry.is_intersecting)
                .filter_map(|entry| self.index_of.get(&entry.target).copied())
                .filter(|&index| self.add(index))
                .count()
        })
    }

    /// Reveal an item directly, e.g. content that is on screen at mount.
    pub fn reveal(&self, index: usize) -> bool {
        index < self.items.len() && self.add(index)
    }

    // Insert into the existing set. Never replaces it wholesale, so
    // concurrent additions in one delivery cannot clobber each other.
    fn add(&self, index: usize) -> bool {
        let added = self.set_visible.update_if(|set| set.insert(index));
        if added {
            tracing::trace!(index, "item revealed");
        }
        added
    }

    /// Release the observer. Safe to call more than once.
    pub fn teardown(&mut self, observers: &mut ObserverRegistry) {
        if let Some(observer) = self.observer.take() {
            observers.disconnect(observer);
            tracing::debug!(items = self.items.len(), "reveal observer released");
        }
    }

    /// Whether [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.observer.is_none()
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Effect that adds the revealed class to `nodes[i]` for every visible `i`.
///
/// The caller disposes the returned effect on unmount.
pub fn render_revealed(
    reveal: &RevealController,
    nodes: Vec<NodeId>,
    patches: &PatchQueue,
) -> EffectId {
    let visible = reveal.visible();
    let patches = patches.clone();
    create_effect(move || {
        visible.with(|set| {
            for node in set.iter().filter_map(|&index| nodes.get(index).copied()) {
                patches.push(DomPatch::Class {
                    node,
                    class: REVEALED,
                    on: true,
                });
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::observer::IntersectionEntry;
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;

    fn setup(n: usize) -> (Dom, ObserverRegistry, RevealController, Vec<NodeId>) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let cards: Vec<_> = (0..n)
            .map(|_| dom.insert_child(body, NodeData::new("div")))
            .collect();
        let mut observers = ObserverRegistry::new();
        let mut reveal = RevealController::new(&mut observers, ObserverOptions::new(0.15));
        for &card in &cards {
            reveal.register(&mut observers, card);
        }
        (dom, observers, reveal, cards)
    }

    fn delivery(reveal: &RevealController, states: &[(NodeId, bool)]) -> IntersectionBatch {
        IntersectionBatch {
            observer: reveal.observer.unwrap(),
            entries: states
                .iter()
                .map(|&(target, is_intersecting)| IntersectionEntry {
                    target,
                    is_intersecting,
                    intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
                })
                .collect(),
        }
    }

    #[test]
    fn register_is_positional_and_idempotent() {
        let (_dom, mut observers, mut reveal, cards) = setup(3);
        assert_eq!(reveal.register(&mut observers, cards[1]), 1);
        assert_eq!(reveal.len(), 3);
        assert_eq!(observers.target_count(reveal.observer.unwrap()), 3);
    }

    #[test]
    fn entering_reveals_once() {
        let (_dom, _observers, reveal, cards) = setup(3);
        let batch = delivery(&reveal, &[(cards[0], true), (cards[2], true), (cards[1], false)]);
        assert_eq!(reveal.handle_batch(&batch), 2);
        assert_eq!(reveal.handle_batch(&batch), 0);
        assert!(reveal.is_visible(0));
        assert!(!reveal.is_visible(1));
        assert!(reveal.is_visible(2));
    }

    #[test]
    fn leaving_does_not_unreveal() {
        let (_dom, _observers, reveal, cards) = setup(1);
        reveal.handle_batch(&delivery(&reveal, &[(cards[0], true)]));
        reveal.handle_batch(&delivery(&reveal, &[(cards[0], false)]));
        assert!(reveal.is_visible(0));
    }

    #[test]
    fn foreign_batches_are_ignored() {
        let (_dom, mut observers, reveal, cards) = setup(1);
        let other = observers.create(ObserverOptions::new(0.3));
        let batch = IntersectionBatch {
            observer: other,
            entries: delivery(&reveal, &[(cards[0], true)]).entries,
        };
        assert_eq!(reveal.handle_batch(&batch), 0);
        assert_eq!(reveal.visible_count(), 0);
    }

    #[test]
    fn teardown_disconnects_and_ignores_late_batches() {
        let (_dom, mut observers, mut reveal, cards) = setup(2);
        let late = delivery(&reveal, &[(cards[0], true)]);
        reveal.teardown(&mut observers);
        reveal.teardown(&mut observers);
        assert!(reveal.is_torn_down());
        assert!(observers.is_empty());
        assert_eq!(reveal.handle_batch(&late), 0);
        assert_eq!(reveal.visible_count(), 0);
    }

    #[test]
    fn direct_reveal_checks_range() {
        let mut observers = ObserverRegistry::new();
        let mut dom = Dom::new();
        let hero = dom.insert(NodeData::new("section"));
        let mut reveal = RevealController::unobserved();
        reveal.register(&mut observers, hero);
        assert!(reveal.reveal(0));
        assert!(!reveal.reveal(0));
        assert!(!reveal.reveal(1));
        assert!(observers.is_empty());
    }
}
