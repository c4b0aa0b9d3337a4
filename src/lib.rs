//! # haustier-oase
//!
//! Headless core of the HaustierOase pet-products site: a catalog landing
//! page whose sections reveal themselves as they scroll into view, a product
//! detail route, a header that reacts to scrolling, and a newsletter dialog
//! that locks the page while open.
//!
//! Everything runs against a deterministic [`browser::Host`]: a retained DOM,
//! a virtual clock, intersection observers and a scroll lock. Embedders feed
//! [`event::InputEvent`]s into a [`Site`] and read the document back;
//! [`runtime::Runtime`] does the same on a tokio task.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed DOM arena with id, class and tag queries
//! - **[`layout`]**: Taffy-powered block layout for scroll offsets and visibility
//! - **[`browser`]**: Viewport, timers, intersection observers, key listeners, scroll lock
//! - **[`reactive`]**: Signals and effects that queue DOM patches
//! - **[`components`]**: Reveal controller, navigation, modal, newsletter flows
//! - **[`pages`]**: Shell, landing page, product detail page
//! - **[`router`]**: Locations, route matching and history
//! - **[`catalog`]**: Product and editorial data
//! - **[`app`]**: The [`Site`] tying everything together
//! - **[`testing`]**: Pilot and DOM outlines for tests

// Foundation
pub mod css;
pub mod error;
pub mod geometry;

// Document and browser model
pub mod browser;
pub mod dom;
pub mod layout;

// Events and reactivity
pub mod event;
pub mod reactive;

// Site
pub mod catalog;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;

// Application
pub mod app;
pub mod logging;
pub mod runtime;
pub mod testing;

pub use app::Site;
pub use config::SiteConfig;
pub use error::SiteError;
pub use router::{Location, Route};
