//! Crate-level error type.

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::css::margin::MarginParseError;
use crate::layout::LayoutError;

/// Anything that can stop a site from starting or processing input.
///
/// User mistakes (a bad email address, an unknown product, a missing
/// anchor) never surface here; they are handled on the page.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Margin(#[from] MarginParseError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("processing did not settle after {0} passes")]
    Unsettled(usize),
}
