//! Document-level key listeners.
//!
//! [`KeyListeners`] maps a key to a message factory. Each registration gets
//! its own [`ListenerId`], so an owner can remove exactly what it added.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::event::input::{Key, KeyEvent};
use crate::event::message::Message;

new_key_type! {
    /// Handle returned by [`KeyListeners::add`].
    pub struct ListenerId;
}

/// Builds the message posted when a listener matches.
pub type MessageFactory = fn() -> Box<dyn Message>;

struct KeyListener {
    key: Key,
    seq: u64,
    factory: MessageFactory,
}

/// Registry of `keydown` listeners on the document.
#[derive(Default)]
pub struct KeyListeners {
    listeners: SlotMap<ListenerId, KeyListener>,
    next_seq: u64,
}

impl KeyListeners {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for `key`. Adding the same factory twice registers it twice,
    /// as `addEventListener` with distinct closures would.
    pub fn add(&mut self, key: Key, factory: MessageFactory) -> ListenerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.listeners.insert(KeyListener { key, seq, factory });
        tracing::debug!(?id, key = %key.dom_name(), "key listener added");
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id).is_some();
        if removed {
            tracing::debug!(?id, "key listener removed");
        }
        removed
    }

    /// Messages from every listener matching the pressed key, in
    /// registration order. Modifiers are ignored, as in a plain
    /// `event.key === "Escape"` check.
    pub fn dispatch(&self, event: &KeyEvent) -> Vec<Box<dyn Message>> {
        let mut matching: Vec<&KeyListener> = self
            .listeners
            .values()
            .filter(|l| l.key == event.code)
            .collect();
        matching.sort_by_key(|l| l.seq);
        matching.into_iter().map(|l| (l.factory)()).collect()
    }

    /// Number of listeners registered for `key`.
    pub fn count_for(&self, key: Key) -> usize {
        self.listeners.values().filter(|l| l.key == key).count()
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for KeyListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<Key> = self.listeners.values().map(|l| l.key).collect();
        f.debug_struct("KeyListeners").field("keys", &keys).finish()
    }
}
