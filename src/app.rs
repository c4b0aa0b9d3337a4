//! Site: the running application.
//!
//! [`Site`] ties the host, the shell, the navigation controller, the
//! newsletter dialog and the mounted page together. Input is applied
//! synchronously; everything asynchronous (timers, key listeners,
//! intersection deliveries) arrives as messages that [`Site::settle`]
//! processes pass by pass until nothing is left to do.

use std::time::Duration;

use crate::browser::observer::IntersectionBatch;
use crate::browser::Host;
use crate::catalog::{Catalog, Content};
use crate::components::{
    DismissModal, ModalFocus, NavigationController, NewsletterDialog, PatchQueue, ScrollToAnchor,
    SignupResolved,
};
use crate::config::SiteConfig;
use crate::dom::node::NodeId;
use crate::error::SiteError;
use crate::event::action::UiAction;
use crate::event::handler::EventDispatcher;
use crate::event::input::InputEvent;
use crate::event::message::Envelope;
use crate::geometry::Size;
use crate::pages::{LandingPage, Page, Shell};
use crate::router::Location;

/// Processing passes allowed before [`Site::settle`] gives up.
pub const MAX_PASSES: usize = 64;

/// The site running in a headless host.
#[derive(Debug)]
pub struct Site {
    /// The browser environment.
    pub host: Host,
    config: SiteConfig,
    catalog: Catalog,
    content: Content,
    shell: Shell,
    nav: NavigationController,
    newsletter: NewsletterDialog,
    page: Option<Page>,
    /// Location the mounted page and the navigation state belong to.
    mounted: Location,
    patches: PatchQueue,
    last_scroll_y: i32,
}

impl Site {
    /// Start the site at `initial` with the built-in catalog and content.
    pub fn new(config: SiteConfig, initial: Location) -> Result<Self, SiteError> {
        Self::with_data(config, initial, Catalog::embedded()?, Content::embedded()?)
    }

    /// Start the site with the given data.
    pub fn with_data(
        config: SiteConfig,
        initial: Location,
        catalog: Catalog,
        content: Content,
    ) -> Result<Self, SiteError> {
        config.validate()?;
        let mut host = Host::new(config.viewport, initial.clone());
        let shell = Shell::build(&mut host.dom);
        let patches = PatchQueue::new();
        let nav = NavigationController::new(
            shell.navigation_nodes(),
            config.scroll_threshold_px,
            config.anchor_scroll_delay(),
            &patches,
        );
        let newsletter = NewsletterDialog::new(shell.modal_root);
        let page = Page::mount(
            &mut host,
            shell.main,
            &initial.route(),
            &catalog,
            &content,
            &config,
            &patches,
        );

        let mut site = Self {
            host,
            config,
            catalog,
            content,
            shell,
            nav,
            newsletter,
            page: Some(page),
            mounted: initial.clone(),
            patches,
            last_scroll_y: 0,
        };
        site.nav.on_route_entry(&mut site.host, &initial);
        site.settle()?;
        tracing::info!(location = %initial, "site started");
        Ok(site)
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Apply one input event and process everything it causes.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), SiteError> {
        tracing::trace!(kind = event.kind(), "input");
        match event {
            InputEvent::Click(node) => self.click(node),
            InputEvent::Key(key) => {
                for message in self.host.keys.dispatch(&key) {
                    self.host.dispatcher.post_boxed(message);
                }
            }
            InputEvent::Input { node, value } => {
                self.host.set_value(node, value);
            }
            InputEvent::Wheel { delta_y } => {
                self.host.wheel(delta_y);
            }
            InputEvent::Resize { width, height } => {
                self.host.resize(Size::new(width, height))?;
            }
        }
        self.settle()
    }

    /// Client-side navigation to `href`, as a router link would do it.
    pub fn navigate(&mut self, href: &str) -> Result<(), SiteError> {
        self.host.router.push(Location::parse(href));
        self.settle()
    }

    /// Go back in history. Returns whether there was an entry to go to.
    pub fn back(&mut self) -> Result<bool, SiteError> {
        let moved = self.host.router.back();
        self.settle()?;
        Ok(moved)
    }

    /// Let `by` of virtual time pass, firing due timers in order.
    pub fn advance(&mut self, by: Duration) -> Result<(), SiteError> {
        let until = self.host.timers.now() + by;
        while self.host.fire_due_timer(until) {
            self.settle()?;
        }
        self.host.timers.advance_to(until);
        self.settle()
    }

    // A click resolves to the first action on the bubble path. Disabled
    // controls swallow the click.
    fn click(&mut self, node: NodeId) {
        let hit = EventDispatcher::bubble_path(&self.host.dom, node)
            .into_iter()
            .find_map(|n| {
                let data = self.host.dom.get(n)?;
                data.action.clone().map(|action| (action, data.disabled))
            });
        match hit {
            Some((_, true)) => tracing::debug!("click on disabled control ignored"),
            Some((action, false)) => self.dispatch_action(action),
            None => {}
        }
    }

    fn dispatch_action(&mut self, action: UiAction) {
        tracing::debug!(?action, "action");
        let host = &mut self.host;
        match action {
            UiAction::Link(href) => self.nav.follow_link(host, &href),
            UiAction::Section(anchor) => self.nav.navigate_to_section(host, &anchor),
            UiAction::External(url) => self.nav.open_external(host, &url),
            UiAction::ToggleMenu => self.nav.toggle_menu(),
            UiAction::OpenNewsletter => {
                self.nav.close_menu();
                self.newsletter.open(host);
            }
            UiAction::CloseNewsletter => {
                self.newsletter.close(host);
            }
            UiAction::SubmitNewsletter => {
                // Rejections are shown to the user by the dialog.
                let _ = self.newsletter.submit(host);
            }
            UiAction::Cart => self.nav.cart(host),
            UiAction::ToggleLike(id) => {
                if let Some(page) = self.page.as_ref().and_then(Page::landing) {
                    page.likes().toggle(id);
                }
            }
            UiAction::ToggleSave(id) => {
                if let Some(page) = self.page.as_ref().and_then(Page::landing) {
                    page.saves().toggle(id);
                }
            }
            UiAction::SubmitSignup => {
                if let Some(page) = self.page.as_mut().and_then(Page::landing_mut) {
                    page.newsletter_mut().submit(host);
                }
            }
            UiAction::SubmitNotify => {
                if let Some(page) = self.page.as_ref().and_then(Page::landing) {
                    page.teaser().submit(host);
                }
            }
            UiAction::Inert => {}
        }
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Run processing passes until the site is idle.
    ///
    /// A pass commits pending patches, follows route changes, lays out,
    /// handles queued messages, reacts to scrolling, fires zero-delay timers
    /// and computes intersections for the next pass.
    pub fn settle(&mut self) -> Result<(), SiteError> {
        for _ in 0..MAX_PASSES {
            let mut busy = self.patches.commit(&mut self.host.dom) > 0;
            busy |= self.sync_route();
            self.host.relayout()?;
            busy |= self.drain_messages();

            let y = self.host.viewport.page_y_offset();
            if y != self.last_scroll_y {
                self.last_scroll_y = y;
                self.nav.on_scroll(y);
                busy = true;
            }

            let now = self.host.timers.now();
            while self.host.fire_due_timer(now) {
                busy = true;
            }
            busy |= self.host.flush_intersections() > 0;

            if !busy && self.patches.is_empty() && self.host.dispatcher.is_empty() {
                return Ok(());
            }
        }
        tracing::warn!(passes = MAX_PASSES, "site did not settle");
        Err(SiteError::Unsettled(MAX_PASSES))
    }

    // Remount on a path change; any location change is a route entry.
    fn sync_route(&mut self) -> bool {
        let location = self.host.router.location().clone();
        if location == self.mounted {
            return false;
        }
        if location.path != self.mounted.path {
            if let Some(mut page) = self.page.take() {
                page.teardown(&mut self.host);
            }
            self.page = Some(Page::mount(
                &mut self.host,
                self.shell.main,
                &location.route(),
                &self.catalog,
                &self.content,
                &self.config,
                &self.patches,
            ));
        }
        self.nav.on_route_entry(&mut self.host, &location);
        self.mounted = location;
        true
    }

    fn drain_messages(&mut self) -> bool {
        let envelopes = self.host.dispatcher.drain();
        let any = !envelopes.is_empty();
        for envelope in &envelopes {
            self.handle_message(envelope);
        }
        any
    }

    fn handle_message(&mut self, envelope: &Envelope) {
        if let Some(batch) = envelope.downcast_ref::<IntersectionBatch>() {
            if let Some(page) = &self.page {
                page.handle_batch(batch);
            }
        } else if let Some(scroll) = envelope.downcast_ref::<ScrollToAnchor>() {
            self.nav.on_anchor_timer(&mut self.host, scroll);
        } else if envelope.is::<ModalFocus>() {
            self.newsletter.on_focus_timer(&mut self.host);
        } else if envelope.is::<DismissModal>() {
            self.newsletter.close(&mut self.host);
        } else if envelope.is::<SignupResolved>() {
            if let Some(page) = self.page.as_mut().and_then(Page::landing_mut) {
                page.newsletter_mut().on_resolved();
            }
        } else {
            tracing::trace!(message = envelope.message.message_name(), "unhandled message");
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }

    pub fn newsletter(&self) -> &NewsletterDialog {
        &self.newsletter
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// The landing page, if it is the mounted page.
    pub fn landing(&self) -> Option<&LandingPage> {
        self.page.as_ref().and_then(Page::landing)
    }

    pub fn location(&self) -> &Location {
        self.host.router.location()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.host.timers.now()
    }

    /// Unmount everything and release every host resource.
    pub fn teardown(&mut self) {
        if let Some(mut page) = self.page.take() {
            page.teardown(&mut self.host);
        }
        self.newsletter.teardown(&mut self.host);
        self.nav.teardown(&mut self.host);
        tracing::debug!("site torn down");
    }
}

// ===========================================================================
// Tests
// ===========================================================================
