//! Auto-tracking effects, memos and batching.
//!
//! An effect re-runs whenever a signal it read changes:
//!
//! ```ignore
//! let (count, set_count) = create_signal(0);
//! let id = create_effect(move || println!("count = {}", count.get()));
//! set_count.set(1); // prints "count = 1"
//! dispose_effect(id);
//! ```
//!
//! Writes inside [`batch`] are coalesced: each affected effect runs once
//! when the outermost batch returns.

use std::collections::HashSet;
use std::fmt;

use super::signal::{create_signal, EffectId, EffectState, ReadSignal, RUNTIME};

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Create a side effect that auto-tracks signal reads.
///
/// The closure runs once immediately to establish its subscriptions, then
/// again after every write to a signal it read on its previous run.
pub fn create_effect(f: impl FnMut() + 'static) -> EffectId {
    let eid = RUNTIME.with(|rt| {
        rt.borrow_mut().effects.insert(EffectState {
            callback: Some(Box::new(f)),
            dependencies: HashSet::new(),
        })
    });
    run_effect(eid);
    eid
}

/// Remove an effect from the runtime. Disposing twice is a no-op.
pub fn dispose_effect(eid: EffectId) {
    let removed = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        let state = rt.effects.remove(eid)?;
        for &sid in &state.dependencies {
            if let Some(subs) = rt.subscribers.get_mut(sid) {
                subs.remove(&eid);
            }
        }
        Some(state)
    });
    // The closure may own signals whose drop touches the runtime.
    drop(removed);
}

/// Number of effects currently alive on this thread.
pub fn live_effects() -> usize {
    RUNTIME.with(|rt| rt.borrow().effects.len())
}

/// Run `f` with dependency tracking suspended.
pub fn untrack<R>(f: impl FnOnce() -> R) -> R {
    let prev = RUNTIME.with(|rt| rt.borrow_mut().tracking.take());
    let out = f();
    RUNTIME.with(|rt| rt.borrow_mut().tracking = prev);
    out
}

// ---------------------------------------------------------------------------
// Memos
// ---------------------------------------------------------------------------

/// A cached derived value.
///
/// Subscribers of the memo only re-run when the computed value changes by
/// `PartialEq`. Dropping the memo disposes its computation.
pub struct Memo<T: 'static> {
    value: ReadSignal<T>,
    effect: EffectId,
}

/// Create a memoised derived computation.
pub fn create_memo<T: PartialEq + 'static>(mut f: impl FnMut() -> T + 'static) -> Memo<T> {
    let first = untrack(&mut f);
    let (value, write) = create_signal(first);
    let current = value.clone();
    let effect = create_effect(move || {
        let next = f();
        if current.with_untracked(|old| old != &next) {
            write.set(next);
        }
    });
    Memo { value, effect }
}

impl<T: 'static> Memo<T> {
    /// Read the memoised value, subscribing the running effect.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.get()
    }

    /// Read by reference, subscribing the running effect.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// A read handle to capture in other effects.
    pub fn signal(&self) -> ReadSignal<T> {
        self.value.clone()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo").field("value", &self.value).finish()
    }
}

impl<T: 'static> Drop for Memo<T> {
    fn drop(&mut self) {
        dispose_effect(self.effect);
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Group signal writes so that each affected effect runs once, after `f`.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    RUNTIME.with(|rt| rt.borrow_mut().batch_depth += 1);
    let out = f();
    let pending = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        rt.batch_depth -= 1;
        if rt.batch_depth == 0 && !rt.flushing {
            rt.flushing = true;
            Some(std::mem::take(&mut rt.pending))
        } else {
            None
        }
    });
    if let Some(pending) = pending {
        flush(pending);
    }
    out
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// Queue effects after a write. Runs them now unless a batch or flush is
/// already in progress.
pub(crate) fn schedule(subs: Vec<EffectId>) {
    if subs.is_empty() {
        return;
    }
    let deferred = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        if rt.batch_depth > 0 || rt.flushing {
            rt.pending.extend(subs.iter().copied());
            true
        } else {
            rt.flushing = true;
            false
        }
    });
    if !deferred {
        flush(subs);
    }
}

fn flush(mut queue: Vec<EffectId>) {
    while !queue.is_empty() {
        let mut seen = HashSet::new();
        let round: Vec<EffectId> = queue.drain(..).filter(|id| seen.insert(*id)).collect();
        for eid in round {
            run_effect(eid);
        }
        // Effects may have written signals.
        queue = RUNTIME.with(|rt| std::mem::take(&mut rt.borrow_mut().pending));
    }
    RUNTIME.with(|rt| rt.borrow_mut().flushing = false);
}

fn run_effect(eid: EffectId) {
    let callback = RUNTIME.with(|rt| {
        let mut guard = rt.borrow_mut();
        let rt = &mut *guard;
        let effect = rt.effects.get_mut(eid)?;
        // Dependencies are rediscovered on every run.
        for sid in effect.dependencies.drain() {
            if let Some(subs) = rt.subscribers.get_mut(sid) {
                subs.remove(&eid);
            }
        }
        effect.callback.take()
    });
    let Some(mut callback) = callback else {
        return;
    };

    let prev = RUNTIME.with(|rt| rt.borrow_mut().tracking.replace(eid));
    callback();

    let orphaned = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        rt.tracking = prev;
        match rt.effects.get_mut(eid) {
            Some(effect) => {
                effect.callback = Some(callback);
                None
            }
            // Disposed while running.
            None => Some(callback),
        }
    });
    drop(orphaned);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let c = Rc::new(Cell::new(0));
        (Rc::clone(&c), c)
    }

    #[test]
    fn effect_runs_on_creation_and_on_change() {
        let (r, w) = create_signal(0);
        let (runs, runs_c) = counter();
        create_effect(move || {
            let _ = r.get();
            runs_c.set(runs_c.get() + 1);
        });
        assert_eq!(runs.get(), 1);
        w.set(1);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn effect_retracks_conditional_deps() {
        let (flag, set_flag) = create_signal(true);
        let (a, set_a) = create_signal(0);
        let (b, set_b) = create_signal(0);
        let (runs, runs_c) = counter();
        create_effect(move || {
            runs_c.set(runs_c.get() + 1);
            if flag.get() {
                let _ = a.get();
            } else {
                let _ = b.get();
            }
        });
        set_flag.set(false);
        assert_eq!(runs.get(), 2);
        set_a.set(1);
        assert_eq!(runs.get(), 2);
        set_b.set(1);
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn dispose_stops_effect_and_is_idempotent() {
        let (r, w) = create_signal(0);
        let (runs, runs_c) = counter();
        let id = create_effect(move || {
            let _ = r.get();
            runs_c.set(runs_c.get() + 1);
        });
        let before = live_effects();
        dispose_effect(id);
        dispose_effect(id);
        assert_eq!(live_effects(), before - 1);
        w.set(5);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn memo_only_notifies_on_change() {
        let (r, w) = create_signal(3);
        let clamped = create_memo(move || r.get().min(10));
        let memo = clamped.signal();
        let (runs, runs_c) = counter();
        create_effect(move || {
            let _ = memo.get();
            runs_c.set(runs_c.get() + 1);
        });
        w.set(15);
        assert_eq!(clamped.get(), 10);
        assert_eq!(runs.get(), 2);
        w.set(20);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn dropping_memo_disposes_computation() {
        let (r, _w) = create_signal(1);
        let before = live_effects();
        let memo = create_memo(move || r.get() * 2);
        assert_eq!(live_effects(), before + 1);
        drop(memo);
        assert_eq!(live_effects(), before);
    }

    #[test]
    fn batch_coalesces_writes() {
        let (a, set_a) = create_signal(0);
        let (b, set_b) = create_signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = Rc::clone(&seen);
        create_effect(move || seen_c.borrow_mut().push(a.get() + b.get()));
        let out = batch(|| {
            set_a.set(1);
            set_b.set(2);
            batch(|| set_a.set(3));
            "done"
        });
        assert_eq!(out, "done");
        assert_eq!(*seen.borrow(), vec![0, 5]);
    }

    #[test]
    fn effect_writing_signal_settles() {
        let (src, set_src) = create_signal(0);
        let (dst, set_dst) = create_signal(0);
        create_effect(move || set_dst.set(src.get() * 10));
        set_src.set(4);
        assert_eq!(dst.get(), 40);
    }

    #[test]
    fn effect_disposing_itself_while_running() {
        let (r, w) = create_signal(0);
        let slot: Rc<Cell<Option<EffectId>>> = Rc::new(Cell::new(None));
        let slot_c = Rc::clone(&slot);
        let (runs, runs_c) = counter();
        let id = create_effect(move || {
            runs_c.set(runs_c.get() + 1);
            if r.get() > 0 {
                if let Some(me) = slot_c.get() {
                    dispose_effect(me);
                }
            }
        });
        slot.set(Some(id));
        w.set(1);
        w.set(2);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn untrack_hides_reads() {
        let (r, w) = create_signal(0);
        let (runs, runs_c) = counter();
        create_effect(move || {
            untrack(|| r.get());
            runs_c.set(runs_c.get() + 1);
        });
        w.set(1);
        assert_eq!(runs.get(), 1);
    }
}
