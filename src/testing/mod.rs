//! Headless testing helpers: Pilot, DOM outlines.
//!
//! Use the [`Pilot`] to drive a [`Site`](crate::app::Site) through scripted
//! input and virtual time. Use [`dom_outline`] and [`outline_of`] to capture
//! a subtree as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{dom_outline, outline_of};
