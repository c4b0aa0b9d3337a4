//! Reactive state: signals, effects, memos.
//!
//! - [`create_signal`] creates a read/write signal pair.
//! - [`create_effect`] registers an auto-tracking side effect.
//! - [`create_memo`] caches a derived computation.
//! - [`batch`] coalesces several writes into one notification pass.

pub mod effect;
pub mod signal;

pub use effect::{batch, create_effect, create_memo, dispose_effect, live_effects, untrack, Memo};
pub use signal::{create_signal, EffectId, ReadSignal, SignalId, WriteSignal};
