//! Fixed header, mobile menu and in-page anchor navigation.
//!
//! Section links work from any route. On the landing page they scroll
//! straight to the section. Elsewhere they navigate to `/#anchor` first and
//! the scroll happens on route entry, after a short delay that lets the new
//! page lay out. A newer route entry cancels a pending scroll.

use std::time::Duration;

use super::{DomPatch, PatchQueue};
use crate::browser::{Host, TimerId};
use crate::dom::node::NodeId;
use crate::reactive::{
    create_effect, create_signal, dispose_effect, EffectId, ReadSignal, WriteSignal,
};
use crate::router::{Location, Route};

/// Posted when a deferred anchor scroll is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollToAnchor {
    pub anchor: String,
    /// Route entry that scheduled the scroll.
    pub generation: u64,
}

crate::impl_message!(ScrollToAnchor);

/// Header nodes the controller renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationNodes {
    pub header: NodeId,
    pub menu_button: NodeId,
    pub mobile_menu: NodeId,
}

/// Header scroll state, mobile menu and anchor navigation.
#[derive(Debug)]
pub struct NavigationController {
    scrolled: ReadSignal<bool>,
    set_scrolled: WriteSignal<bool>,
    menu_open: ReadSignal<bool>,
    set_menu_open: WriteSignal<bool>,
    effects: Vec<EffectId>,
    pending_scroll: Option<TimerId>,
    generation: u64,
    threshold: i32,
    anchor_delay: Duration,
}

impl NavigationController {
    /// Create the controller and start rendering into `nodes`.
    pub fn new(
        nodes: NavigationNodes,
        threshold: i32,
        anchor_delay: Duration,
        patches: &PatchQueue,
    ) -> Self {
        let (scrolled, set_scrolled) = create_signal(false);
        let (menu_open, set_menu_open) = create_signal(false);
        let header_effect = {
            let scrolled = scrolled.clone();
            let patches = patches.clone();
            create_effect(move || {
                patches.push(DomPatch::Class {
                    node: nodes.header,
                    class: "scrolled",
                    on: scrolled.get(),
                });
            })
        };
        let menu_effect = {
            let menu_open = menu_open.clone();
            let patches = patches.clone();
            create_effect(move || {
                let open = menu_open.get();
                patches.push(DomPatch::Class {
                    node: nodes.mobile_menu,
                    class: "open",
                    on: open,
                });
                patches.push(DomPatch::Hidden {
                    node: nodes.mobile_menu,
                    hidden: !open,
                });
                patches.push(DomPatch::Text {
                    node: nodes.menu_button,
                    text: if open { "✕" } else { "☰" }.to_owned(),
                });
            })
        };

        Self {
            scrolled,
            set_scrolled,
            menu_open,
            set_menu_open,
            effects: vec![header_effect, menu_effect],
            pending_scroll: None,
            generation: 0,
            threshold,
            anchor_delay,
        }
    }

    // ── Scroll state ─────────────────────────────────────────────────

    /// Update the header state for a scroll offset. Returns whether it changed.
    pub fn on_scroll(&self, page_y_offset: i32) -> bool {
        let scrolled = page_y_offset > self.threshold;
        self.set_scrolled.update_if(|current| {
            let changed = *current != scrolled;
            *current = scrolled;
            changed
        })
    }

    /// Whether the page is scrolled past the threshold.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get_untracked()
    }

    // ── Mobile menu ──────────────────────────────────────────────────

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get_untracked()
    }

    /// Flip the mobile menu.
    pub fn toggle_menu(&self) {
        self.set_menu_open.update(|open| *open = !*open);
        tracing::debug!(open = self.is_menu_open(), "mobile menu toggled");
    }

    /// Close the mobile menu. Returns whether it was open.
    pub fn close_menu(&self) -> bool {
        let closed = self.set_menu_open.update_if(|open| std::mem::replace(open, false));
        if closed {
            tracing::debug!("mobile menu closed");
        }
        closed
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Go to an in-page section from any route.
    ///
    /// Off the landing page this only navigates to `/#anchor`; the scroll
    /// follows in [`on_route_entry`](Self::on_route_entry). A missing
    /// section is a no-op.
    pub fn navigate_to_section(&mut self, host: &mut Host, anchor: &str) {
        let anchor = anchor.trim_start_matches('#');
        if host.router.route().is_home() {
            host.scroll_to_anchor(anchor);
        } else {
            tracing::debug!(anchor, "section link off the landing page, navigating home");
            host.router.push(Location::home(Some(anchor)));
        }
        self.close_menu();
    }

    /// React to a new route or hash.
    ///
    /// Cancels any pending anchor scroll, then on the landing page with a
    /// hash schedules a new one.
    pub fn on_route_entry(&mut self, host: &mut Host, location: &Location) {
        self.generation += 1;
        if let Some(timer) = self.pending_scroll.take() {
            if host.timers.clear_timeout(timer) {
                tracing::debug!("pending anchor scroll superseded");
            }
        }
        let Some(anchor) = location.hash.as_deref() else {
            return;
        };
        if location.route() != Route::Home {
            return;
        }
        let timer = host.timers.set_timeout(
            self.anchor_delay,
            ScrollToAnchor {
                anchor: anchor.to_owned(),
                generation: self.generation,
            },
        );
        tracing::debug!(anchor, delay = ?self.anchor_delay, "anchor scroll scheduled");
        self.pending_scroll = Some(timer);
    }

    /// Run a deferred anchor scroll. Stale deliveries are dropped.
    pub fn on_anchor_timer(&mut self, host: &mut Host, message: &ScrollToAnchor) -> bool {
        if message.generation != self.generation {
            tracing::debug!(anchor = %message.anchor, "stale anchor scroll dropped");
            return false;
        }
        self.pending_scroll = None;
        host.scroll_to_anchor(&message.anchor)
    }

    /// The scheduled anchor scroll, if any.
    pub fn pending_scroll(&self) -> Option<TimerId> {
        self.pending_scroll
    }

    /// Open an outbound link in a new window.
    pub fn open_external(&self, host: &mut Host, url: &str) {
        host.open_window(url);
        self.close_menu();
    }

    /// Client-side navigation to a path, e.g. the logo link.
    pub fn follow_link(&self, host: &mut Host, href: &str) {
        host.router.push(Location::parse(href));
        self.close_menu();
    }

    /// The cart button. There is no shop yet.
    pub fn cart(&self, host: &mut Host) {
        host.alert("Shop kommt bald! 🛒");
    }

    /// Cancel the pending scroll and stop rendering.
    pub fn teardown(&mut self, host: &mut Host) {
        if let Some(timer) = self.pending_scroll.take() {
            host.timers.clear_timeout(timer);
        }
        for effect in self.effects.drain(..) {
            dispose_effect(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::scalar::Scalar;
    use crate::dom::node::NodeData;
    use crate::geometry::Size;
    use crate::layout::style::BoxStyle;

    struct Fixture {
        host: Host,
        nav: NavigationController,
        nodes: NavigationNodes,
        patches: PatchQueue,
    }

    fn fixture(initial: &str) -> Fixture {
        let mut host = Host::new(Size::new(1280, 800), Location::parse(initial));
        let body = host.dom.insert(NodeData::new("body"));
        let header = host.dom.insert_child(body, NodeData::new("nav"));
        let menu_button = host.dom.insert_child(header, NodeData::new("button"));
        let mobile_menu = host.dom.insert_child(header, NodeData::new("div"));
        for id in ["hero", "categories", "blog", "products"] {
            host.dom.insert_child(
                body,
                NodeData::new("section")
                    .with_id(id)
                    .with_style(BoxStyle::column().with_height(Scalar::px(1000.0))),
            );
        }
        host.relayout().unwrap();
        let nodes = NavigationNodes { header, menu_button, mobile_menu };
        let patches = PatchQueue::new();
        let nav = NavigationController::new(nodes, 50, Duration::from_millis(50), &patches);
        Fixture { host, nav, nodes, patches }
    }

    fn fire_timers(f: &mut Fixture, until: Duration) {
        while f.host.fire_due_timer(until) {
            for envelope in f.host.dispatcher.drain() {
                if let Some(msg) = envelope.downcast_ref::<ScrollToAnchor>() {
                    f.nav.on_anchor_timer(&mut f.host, msg);
                }
            }
        }
    }

    #[test]
    fn scroll_threshold_is_strict() {
        let f = fixture("/");
        assert!(!f.nav.on_scroll(50));
        assert!(!f.nav.is_scrolled());
        assert!(f.nav.on_scroll(51));
        assert!(!f.nav.on_scroll(400));
        assert!(f.nav.is_scrolled());
        assert!(f.nav.on_scroll(0));
        assert!(!f.nav.is_scrolled());
    }

    #[test]
    fn header_class_follows_scroll_only() {
        let mut f = fixture("/");
        f.nav.toggle_menu();
        f.patches.commit(&mut f.host.dom);
        assert!(!f.host.dom.get(f.nodes.header).unwrap().has_class("scrolled"));
        assert!(f.host.dom.get(f.nodes.mobile_menu).unwrap().has_class("open"));
        assert_eq!(f.host.dom.get(f.nodes.menu_button).unwrap().text.as_deref(), Some("✕"));

        f.nav.on_scroll(120);
        f.patches.commit(&mut f.host.dom);
        assert!(f.host.dom.get(f.nodes.header).unwrap().has_class("scrolled"));

        f.nav.close_menu();
        f.patches.commit(&mut f.host.dom);
        assert!(f.host.dom.get(f.nodes.header).unwrap().has_class("scrolled"));
        assert!(f.host.dom.get(f.nodes.mobile_menu).unwrap().style.hidden);
    }

    #[test]
    fn close_menu_is_idempotent() {
        let f = fixture("/");
        assert!(!f.nav.close_menu());
        f.nav.toggle_menu();
        assert!(f.nav.close_menu());
        assert!(!f.nav.close_menu());
    }

    #[test]
    fn section_link_on_landing_scrolls_now_and_closes_menu() {
        let mut f = fixture("/");
        f.nav.toggle_menu();
        f.nav.navigate_to_section(&mut f.host, "#blog");
        assert_eq!(f.host.viewport.page_y_offset(), 2000);
        assert!(!f.nav.is_menu_open());
        assert_eq!(f.host.router.len(), 1);
    }

    #[test]
    fn section_link_elsewhere_navigates_home_without_scrolling() {
        let mut f = fixture("/produkt/abc");
        f.nav.toggle_menu();
        f.nav.navigate_to_section(&mut f.host, "#products");
        assert_eq!(f.host.router.location(), &Location::parse("/#products"));
        assert!(f.host.viewport.scroll_log().is_empty());
        assert!(!f.nav.is_menu_open());
    }

    #[test]
    fn missing_section_is_a_noop() {
        let mut f = fixture("/");
        f.nav.navigate_to_section(&mut f.host, "#impressum");
        assert!(f.host.viewport.scroll_log().is_empty());
    }

    #[test]
    fn route_entry_scrolls_after_delay() {
        let mut f = fixture("/");
        let location = Location::parse("/#products");
        f.nav.on_route_entry(&mut f.host, &location);
        assert!(f.nav.pending_scroll().is_some());
        fire_timers(&mut f, Duration::from_millis(49));
        assert!(f.host.viewport.scroll_log().is_empty());
        fire_timers(&mut f, Duration::from_millis(50));
        assert_eq!(f.host.viewport.page_y_offset(), 3000);
        assert!(f.nav.pending_scroll().is_none());
    }

    #[test]
    fn newer_route_entry_supersedes_pending_scroll() {
        let mut f = fixture("/");
        f.nav.on_route_entry(&mut f.host, &Location::parse("/#products"));
        f.nav.on_route_entry(&mut f.host, &Location::parse("/#blog"));
        assert_eq!(f.host.timers.pending_count(), 1);
        fire_timers(&mut f, Duration::from_secs(1));
        let tops: Vec<i32> = f.host.viewport.scroll_log().iter().map(|r| r.top).collect();
        assert_eq!(tops, vec![2000]);
    }

    #[test]
    fn route_entry_without_hash_or_off_landing_does_nothing() {
        let mut f = fixture("/");
        f.nav.on_route_entry(&mut f.host, &Location::parse("/"));
        f.nav.on_route_entry(&mut f.host, &Location::parse("/produkt/abc#blog"));
        assert_eq!(f.host.timers.pending_count(), 0);
    }

    #[test]
    fn stale_delivery_is_dropped() {
        let mut f = fixture("/");
        f.nav.on_route_entry(&mut f.host, &Location::parse("/#products"));
        let stale = ScrollToAnchor { anchor: "products".into(), generation: 0 };
        assert!(!f.nav.on_anchor_timer(&mut f.host, &stale));
        assert!(f.host.viewport.scroll_log().is_empty());
    }

    #[test]
    fn external_links_open_windows_and_close_menu() {
        let mut f = fixture("/");
        f.nav.toggle_menu();
        f.nav.open_external(&mut f.host, "https://www.instagram.com/");
        assert_eq!(f.host.opened_windows(), &["https://www.instagram.com/".to_owned()]);
        assert!(!f.nav.is_menu_open());
    }

    #[test]
    fn cart_alerts() {
        let mut f = fixture("/");
        f.nav.cart(&mut f.host);
        assert_eq!(f.host.alerts(), &["Shop kommt bald! 🛒".to_owned()]);
    }

    #[test]
    fn teardown_cancels_pending_scroll() {
        let mut f = fixture("/");
        f.nav.on_route_entry(&mut f.host, &Location::parse("/#blog"));
        f.nav.teardown(&mut f.host);
        assert_eq!(f.host.timers.pending_count(), 0);
    }
}
