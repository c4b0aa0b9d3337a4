//! Event dispatch: message queue and click bubble path.
//!
//! [`EventDispatcher`] maintains a FIFO of [`Envelope`]s. The site's loop
//! drains it pass by pass; anything pushed while a pass runs is handled on
//! the next pass.

use std::collections::VecDeque;

use super::message::{Envelope, Message};
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue-based event dispatcher.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message envelope for later processing.
    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Enqueue a bare message.
    pub fn post(&mut self, message: impl Message) {
        self.push(Envelope::new(message));
    }

    /// Enqueue an already boxed message.
    pub fn post_boxed(&mut self, message: Box<dyn Message>) {
        self.push(Envelope::from_boxed(message));
    }

    /// Drain all pending messages. The queue is empty afterwards.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Compute the bubble path from `start` up to the root (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
    /// `start` does not exist.
    pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
        if !dom.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(dom.ancestors(start));
        path
    }
}

// ===========================================================================
// Tests
// ===========================================================================
