//! Page markup and the route-to-page mapping.

pub mod landing;
pub mod product;
pub mod shell;

pub use landing::LandingPage;
pub use product::{DetailView, ProductPage, NOT_FOUND_TITLE};
pub use shell::Shell;

use crate::browser::observer::IntersectionBatch;
use crate::browser::Host;
use crate::catalog::{Catalog, Content};
use crate::components::PatchQueue;
use crate::config::SiteConfig;
use crate::dom::node::NodeId;
use crate::router::Route;

/// The page mounted in the shell's main slot.
#[derive(Debug)]
pub enum Page {
    Landing(Box<LandingPage>),
    /// A detail route, or the fallback for any unmatched path.
    Product(ProductPage),
}

impl Page {
    /// Mount the page for `route` under `main`.
    pub fn mount(
        host: &mut Host,
        main: NodeId,
        route: &Route,
        catalog: &Catalog,
        content: &Content,
        config: &SiteConfig,
        patches: &PatchQueue,
    ) -> Self {
        match route {
            Route::Home => Page::Landing(Box::new(LandingPage::mount(
                host, main, catalog, content, config, patches,
            ))),
            Route::Product { id } => Page::Product(ProductPage::mount(host, main, catalog, id)),
            Route::NotFound => Page::Product(ProductPage::not_found(host, main)),
        }
    }

    pub fn landing(&self) -> Option<&LandingPage> {
        match self {
            Page::Landing(page) => Some(page),
            Page::Product(_) => None,
        }
    }

    pub fn landing_mut(&mut self) -> Option<&mut LandingPage> {
        match self {
            Page::Landing(page) => Some(page),
            Page::Product(_) => None,
        }
    }

    pub fn product(&self) -> Option<&ProductPage> {
        match self {
            Page::Product(page) => Some(page),
            Page::Landing(_) => None,
        }
    }

    /// Route an intersection delivery. Pages without observers ignore it.
    pub fn handle_batch(&self, batch: &IntersectionBatch) -> usize {
        self.landing().map_or(0, |page| page.handle_batch(batch))
    }

    pub fn teardown(&mut self, host: &mut Host) {
        match self {
            Page::Landing(page) => page.teardown(host),
            Page::Product(page) => page.teardown(host),
        }
    }
}
