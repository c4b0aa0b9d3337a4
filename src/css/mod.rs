//! CSS value parsing: lengths, percentages and `rootMargin` shorthand.

pub mod margin;
pub mod scalar;
pub mod tokenizer;

pub use margin::{parse_root_margin, MarginParseError, RootMargin};
pub use scalar::{Scalar, Unit};
