//! Signals and the thread-local reactive runtime.
//!
//! Fine-grained, single-threaded reactivity: signals hold values, effects
//! auto-track the signals they read, and a write re-runs every subscribed
//! effect. A signal's value lives in its handles; the runtime only keeps the
//! subscription graph, so a component's state is freed when the component
//! (and every effect capturing its signals) is dropped.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

// ---------------------------------------------------------------------------
// IDs
// ---------------------------------------------------------------------------

new_key_type! {
    /// Identifies a signal in the subscription graph.
    pub struct SignalId;
    /// Identifies a live effect.
    pub struct EffectId;
}

// ---------------------------------------------------------------------------
// Runtime internals
// ---------------------------------------------------------------------------

pub(crate) struct EffectState {
    /// Taken out while the effect runs so the runtime is never borrowed
    /// across user code.
    pub(crate) callback: Option<Box<dyn FnMut()>>,
    pub(crate) dependencies: HashSet<SignalId>,
}

pub(crate) struct Runtime {
    pub(crate) subscribers: SlotMap<SignalId, HashSet<EffectId>>,
    pub(crate) effects: SlotMap<EffectId, EffectState>,
    /// The effect currently executing, for auto-tracking.
    pub(crate) tracking: Option<EffectId>,
    /// Greater than zero inside [`batch`](super::effect::batch).
    pub(crate) batch_depth: usize,
    /// Effects to run once the outermost batch or flush finishes.
    pub(crate) pending: Vec<EffectId>,
    /// Set while the notification loop is running.
    pub(crate) flushing: bool,
}

impl Runtime {
    fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            tracking: None,
            batch_depth: 0,
            pending: Vec::new(),
            flushing: false,
        }
    }
}

thread_local! {
    pub(crate) static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

// ---------------------------------------------------------------------------
// Signal storage
// ---------------------------------------------------------------------------

struct SignalInner<T> {
    id: SignalId,
    value: RefCell<T>,
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        // The runtime may already be torn down at thread exit, or borrowed if
        // an effect closure is being dropped by the runtime itself. A stale
        // graph entry is harmless in both cases.
        let _ = RUNTIME.try_with(|rt| {
            if let Ok(mut rt) = rt.try_borrow_mut() {
                rt.subscribers.remove(self.id);
            }
        });
    }
}

/// Create a reactive signal with the given initial value.
///
/// Returns a `(ReadSignal<T>, WriteSignal<T>)` pair. Reading inside an effect
/// subscribes that effect to later writes.
pub fn create_signal<T: 'static>(initial: T) -> (ReadSignal<T>, WriteSignal<T>) {
    let id = RUNTIME.with(|rt| rt.borrow_mut().subscribers.insert(HashSet::new()));
    let inner = Rc::new(SignalInner {
        id,
        value: RefCell::new(initial),
    });
    (
        ReadSignal {
            inner: Rc::clone(&inner),
        },
        WriteSignal { inner },
    )
}

// ---------------------------------------------------------------------------
// ReadSignal
// ---------------------------------------------------------------------------

/// Read half of a signal. Cheap to clone.
pub struct ReadSignal<T: 'static> {
    inner: Rc<SignalInner<T>>,
}

impl<T: 'static> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSignal")
            .field("id", &self.inner.id)
            .field("value", &*self.inner.value.borrow())
            .finish()
    }
}

impl<T: 'static> ReadSignal<T> {
    /// The signal's graph id.
    pub fn id(&self) -> SignalId {
        self.inner.id
    }

    /// Read the current value, subscribing the running effect (if any).
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read by reference without cloning. Still subscribes the running effect.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        track(self.inner.id);
        f(&self.inner.value.borrow())
    }

    /// Read without subscribing any running effect.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.with_untracked(T::clone)
    }

    /// Read by reference without subscribing any running effect.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }
}

// ---------------------------------------------------------------------------
// WriteSignal
// ---------------------------------------------------------------------------

/// Write half of a signal. Cheap to clone.
pub struct WriteSignal<T: 'static> {
    inner: Rc<SignalInner<T>>,
}

impl<T: 'static> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> fmt::Debug for WriteSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteSignal")
            .field("id", &self.inner.id)
            .finish()
    }
}

impl<T: 'static> WriteSignal<T> {
    /// Overwrite the value and notify subscribers.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        notify(self.inner.id);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.value.borrow_mut());
        notify(self.inner.id);
    }

    /// Mutate the value in place, notifying only when `f` returns `true`.
    ///
    /// Returns what `f` returned.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = f(&mut self.inner.value.borrow_mut());
        if changed {
            notify(self.inner.id);
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// Graph plumbing
// ---------------------------------------------------------------------------

fn track(signal: SignalId) {
    RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        let Some(eid) = rt.tracking else {
            return;
        };
        if let Some(subs) = rt.subscribers.get_mut(signal) {
            subs.insert(eid);
        }
        if let Some(effect) = rt.effects.get_mut(eid) {
            effect.dependencies.insert(signal);
        }
    });
}

fn notify(signal: SignalId) {
    let subs: Vec<EffectId> = RUNTIME.with(|rt| {
        rt.borrow()
            .subscribers
            .get(signal)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    });
    super::effect::schedule(subs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::effect::create_effect;
    use std::cell::Cell;

    #[test]
    fn create_and_read_signal() {
        let (r, _w) = create_signal(42);
        assert_eq!(r.get(), 42);
    }

    #[test]
    fn set_and_update() {
        let (r, w) = create_signal(1);
        w.set(10);
        assert_eq!(r.get(), 10);
        w.update(|v| *v += 5);
        assert_eq!(r.get(), 15);
    }

    #[test]
    fn with_borrows_without_clone() {
        let (r, _w) = create_signal(vec![1, 2, 3]);
        assert_eq!(r.with(|v| v.len()), 3);
    }

    #[test]
    fn untracked_read_does_not_subscribe() {
        let (r, w) = create_signal(0);
        let runs = Rc::new(Cell::new(0));
        let runs_c = Rc::clone(&runs);
        let _effect = create_effect(move || {
            let _ = r.get_untracked();
            runs_c.set(runs_c.get() + 1);
        });
        w.set(1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn update_if_skips_notification_when_unchanged() {
        let (r, w) = create_signal(5);
        let runs = Rc::new(Cell::new(0));
        let runs_c = Rc::clone(&runs);
        let _effect = create_effect(move || {
            let _ = r.get();
            runs_c.set(runs_c.get() + 1);
        });
        assert!(!w.update_if(|_| false));
        assert_eq!(runs.get(), 1);
        assert!(w.update_if(|v| {
            *v = 6;
            true
        }));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn dropping_all_handles_removes_graph_entry() {
        let (r, w) = create_signal(0u8);
        let id = r.id();
        drop(r);
        assert!(RUNTIME.with(|rt| rt.borrow().subscribers.contains_key(id)));
        drop(w);
        assert!(!RUNTIME.with(|rt| rt.borrow().subscribers.contains_key(id)));
    }

    #[test]
    fn debug_shows_value() {
        let (r, w) = create_signal("hi");
        assert!(format!("{r:?}").contains("\"hi\""));
        assert!(format!("{w:?}").starts_with("WriteSignal"));
    }
}
