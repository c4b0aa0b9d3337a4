//! Per-card on/off state: liked products, saved blog posts.

use std::collections::BTreeSet;
use std::fmt;

use super::{DomPatch, PatchQueue};
use crate::dom::node::NodeId;
use crate::reactive::{
    create_effect, create_signal, dispose_effect, EffectId, ReadSignal, WriteSignal,
};

/// A reactive set of keys with a class rendered onto each key's button.
pub struct ToggleSet<K: Ord + Clone + 'static> {
    keys: ReadSignal<BTreeSet<K>>,
    set_keys: WriteSignal<BTreeSet<K>>,
    render: Option<EffectId>,
}

impl<K: Ord + Clone + 'static> ToggleSet<K> {
    pub fn new() -> Self {
        let (keys, set_keys) = create_signal(BTreeSet::new());
        Self {
            keys,
            set_keys,
            render: None,
        }
    }

    /// Render `class` onto each button whose key is in the set.
    pub fn bind(&mut self, buttons: Vec<(K, NodeId)>, class: &'static str, patches: &PatchQueue) {
        if let Some(previous) = self.render.take() {
            dispose_effect(previous);
        }
        let keys = self.keys.clone();
        let patches = patches.clone();
        self.render = Some(create_effect(move || {
            keys.with(|set| {
                for (key, node) in &buttons {
                    patches.push(DomPatch::Class {
                        node: *node,
                        class,
                        on: set.contains(key),
                    });
                }
            });
        }));
    }

    /// Flip `key`. Returns its new state.
    pub fn toggle(&self, key: K) -> bool {
        let mut on = false;
        self.set_keys.update(|set| {
            on = !set.remove(&key);
            if on {
                set.insert(key);
            }
        });
        on
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.with_untracked(|set| set.contains(key))
    }

    pub fn len(&self) -> usize {
        self.keys.with_untracked(BTreeSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop rendering.
    pub fn teardown(&mut self) {
        if let Some(render) = self.render.take() {
            dispose_effect(render);
        }
    }
}

impl<K: Ord + Clone + 'static> Default for ToggleSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone + fmt::Debug + 'static> fmt::Debug for ToggleSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.keys
            .with_untracked(|set| f.debug_set().entries(set.iter()).finish())
    }
}
