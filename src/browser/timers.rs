//! `setTimeout` on a virtual clock.
//!
//! Timers carry a boxed [`Message`] that is posted when the timer fires.
//! Time only moves when the owner advances the clock, which makes deferred
//! behavior fully deterministic under test.

use std::fmt;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::event::message::Message;

new_key_type! {
    /// Handle returned by [`TimerQueue::set_timeout`].
    pub struct TimerId;
}

struct Timer {
    deadline: Duration,
    seq: u64,
    message: Box<dyn Message>,
}

/// Pending timers plus the virtual clock.
#[derive(Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    timers: SlotMap<TimerId, Timer>,
}

impl TimerQueue {
    /// An empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since start.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `message` to be posted after `delay`.
    ///
    /// A zero delay fires on the next processing pass, never synchronously.
    pub fn set_timeout(&mut self, delay: Duration, message: impl Message) -> TimerId {
        self.set_timeout_boxed(delay, Box::new(message))
    }

    /// Schedule an already boxed message.
    pub fn set_timeout_boxed(&mut self, delay: Duration, message: Box<dyn Message>) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.timers.insert(Timer {
            deadline: self.now + delay,
            seq,
            message,
        });
        tracing::trace!(?id, ?delay, "timer scheduled");
        id
    }

    /// Cancel a pending timer. Returns whether it was still pending.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let cleared = self.timers.remove(id).is_some();
        if cleared {
            tracing::trace!(?id, "timer cleared");
        }
        cleared
    }

    /// Whether `id` is scheduled and has not fired.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    ///
    /// Ties are broken by scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, Box<dyn Message>)> {
        let (id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))?;
        let timer = self.timers.remove(id)?;
        self.now = self.now.max(timer.deadline);
        tracing::trace!(?id, message = timer.message.message_name(), "timer fired");
        Some((id, timer.message))
    }

    /// Move the clock forward to `to`. The clock never runs backwards.
    pub fn advance_to(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.timers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Tick(&'static str);
    crate::impl_message!(Tick);

    fn name(msg: &dyn Message) -> &'static str {
        msg.as_any().downcast_ref::<Tick>().map(|t| t.0).unwrap_or("?")
    }

    #[test]
    fn fires_in_deadline_then_insertion_order() {
        let mut q = TimerQueue::new();
        q.set_timeout(Duration::from_millis(50), Tick("late"));
        q.set_timeout(Duration::from_millis(10), Tick("a"));
        q.set_timeout(Duration::from_millis(10), Tick("b"));

        let until = Duration::from_millis(100);
        let mut fired = Vec::new();
        while let Some((_, msg)) = q.pop_due(until) {
            fired.push(name(msg.as_ref()));
        }
        assert_eq!(fired, vec!["a", "b", "late"]);
        assert_eq!(q.now(), Duration::from_millis(50));
    }

    #[test]
    fn not_due_before_deadline() {
        let mut q = TimerQueue::new();
        let id = q.set_timeout(Duration::from_millis(50), Tick("x"));
        assert!(q.pop_due(Duration::from_millis(49)).is_none());
        assert!(q.is_pending(id));
        assert_eq!(q.next_deadline(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn zero_delay_is_due_now() {
        let mut q = TimerQueue::new();
        q.advance_to(Duration::from_secs(1));
        q.set_timeout(Duration::ZERO, Tick("focus"));
        let (_, msg) = q.pop_due(q.now()).unwrap();
        assert_eq!(name(msg.as_ref()), "focus");
    }

    #[test]
    fn clear_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.set_timeout(Duration::from_millis(50), Tick("x"));
        assert!(q.clear_timeout(id));
        assert!(!q.clear_timeout(id));
        assert_eq!(q.pending_count(), 0);
        assert!(q.pop_due(Duration::from_secs(10)).is_none());
    }

    #[test]
    fn clock_never_goes_back() {
        let mut q = TimerQueue::new();
        q.advance_to(Duration::from_millis(100));
        q.advance_to(Duration::from_millis(10));
        assert_eq!(q.now(), Duration::from_millis(100));
    }
}
