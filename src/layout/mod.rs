//! Page layout: box styles and the taffy-backed layout pass.

pub mod engine;
pub mod style;

pub use engine::{LayoutEngine, LayoutError};
pub use style::{BoxStyle, Direction};
