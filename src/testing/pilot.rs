//! Pilot: scripted interaction with a headless [`Site`].
//!
//! The `Pilot` wraps a [`Site`] and provides methods to simulate user input
//! (clicks, typing, key presses, scrolling, resizing), let virtual time pass,
//! and inspect the resulting document.

use std::time::Duration;

use crate::app::Site;
use crate::browser::Host;
use crate::config::SiteConfig;
use crate::dom::node::{NodeData, NodeId};
use crate::error::SiteError;
use crate::event::input::{InputEvent, Key, KeyEvent};
use crate::router::Location;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless site driver for testing.
///
/// # Examples
///
/// ```
/// use haustier_oase::testing::Pilot;
///
/// let mut pilot = Pilot::open("/produkt/unbekannt").unwrap();
/// assert!(pilot.text("h1").is_some());
/// pilot.click(".back").unwrap();
/// assert_eq!(pilot.location().path, "/");
/// ```
#[derive(Debug)]
pub struct Pilot {
    site: Site,
}

impl Pilot {
    /// The site at `/` with the default configuration.
    pub fn new() -> Result<Self, SiteError> {
        Self::with_config(SiteConfig::default(), "/")
    }

    /// The site opened directly at `href`.
    pub fn open(href: &str) -> Result<Self, SiteError> {
        Self::with_config(SiteConfig::default(), href)
    }

    pub fn with_config(config: SiteConfig, href: &str) -> Result<Self, SiteError> {
        Ok(Self {
            site: Site::new(config, Location::parse(href))?,
        })
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Click the first node matching `selector`. Returns `false` if nothing
    /// matches.
    pub fn click(&mut self, selector: &str) -> Result<bool, SiteError> {
        match self.find(selector) {
            Some(node) => self.click_node(node).map(|()| true),
            None => Ok(false),
        }
    }

    /// Click a specific node.
    pub fn click_node(&mut self, node: NodeId) -> Result<(), SiteError> {
        self.site.handle_input(InputEvent::Click(node))
    }

    /// Replace the value of a form field.
    pub fn type_into(&mut self, node: NodeId, text: &str) -> Result<(), SiteError> {
        self.site.handle_input(InputEvent::Input {
            node,
            value: text.to_owned(),
        })
    }

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) -> Result<(), SiteError> {
        self.site.handle_input(InputEvent::Key(KeyEvent::plain(key)))
    }

    /// Scroll with the wheel by `delta_y` pixels.
    pub fn scroll(&mut self, delta_y: i32) -> Result<(), SiteError> {
        self.site.handle_input(InputEvent::Wheel { delta_y })
    }

    /// Scroll the wheel until the page offset reaches at least `y` or the
    /// page ends.
    pub fn scroll_to(&mut self, y: i32) -> Result<(), SiteError> {
        let delta = y - self.host().viewport.page_y_offset();
        self.scroll(delta)
    }

    /// Resize the window.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SiteError> {
        self.site.handle_input(InputEvent::Resize { width, height })
    }

    /// Client-side navigation, like following a router link.
    pub fn navigate(&mut self, href: &str) -> Result<(), SiteError> {
        self.site.navigate(href)
    }

    /// Let virtual time pass.
    pub fn advance(&mut self, by: Duration) -> Result<(), SiteError> {
        self.site.advance(by)
    }

    /// Let `ms` milliseconds of virtual time pass.
    pub fn wait_ms(&mut self, ms: u64) -> Result<(), SiteError> {
        self.advance(Duration::from_millis(ms))
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut Site {
        &mut self.site
    }

    pub fn host(&self) -> &Host {
        &self.site.host
    }

    pub fn location(&self) -> &Location {
        self.site.location()
    }

    /// First node matching `selector`.
    pub fn find(&self, selector: &str) -> Option<NodeId> {
        self.site.host.dom.query_selector(selector)
    }

    pub fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.site.host.dom.get(node)
    }

    /// Text of the first node matching `selector`.
    pub fn text(&self, selector: &str) -> Option<&str> {
        self.find(selector)
            .and_then(|n| self.node(n))
            .and_then(|d| d.text.as_deref())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|d| d.has_class(class))
    }

    /// Current page scroll offset.
    pub fn scroll_y(&self) -> i32 {
        self.site.host.viewport.page_y_offset()
    }

    /// Outline of the first node matching `selector`.
    pub fn outline(&self, selector: &str) -> Option<String> {
        super::snapshot::outline_of(&self.site.host.dom, selector)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
