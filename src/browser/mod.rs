//! Headless browser host.
//!
//! [`Host`] stands in for `window` and `document`: it owns the DOM, the
//! scroll position, timers, key listeners, intersection observers, the
//! scroll lock, focus, the router, and logs of alerts and opened windows.
//! Components receive `&mut Host` and drive it the way page scripts drive
//! browser APIs.

pub mod listeners;
pub mod observer;
pub mod scroll_lock;
pub mod timers;
pub mod viewport;

use std::time::Duration;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::handler::EventDispatcher;
use crate::geometry::Size;
use crate::layout::{LayoutEngine, LayoutError};
use crate::router::{Location, Router};

pub use listeners::{KeyListeners, ListenerId, MessageFactory};
pub use observer::{
    IntersectionBatch, IntersectionEntry, ObserverId, ObserverOptions, ObserverRegistry,
};
pub use scroll_lock::{ScrollLock, ScrollLockToken};
pub use timers::{TimerId, TimerQueue};
pub use viewport::{ScrollBehavior, ScrollRecord, Viewport};

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The browser environment a site runs in.
#[derive(Debug)]
pub struct Host {
    /// The document.
    pub dom: Dom,
    /// Window size and scroll position.
    pub viewport: Viewport,
    /// `setTimeout` / `clearTimeout`.
    pub timers: TimerQueue,
    /// Document-level `keydown` listeners.
    pub keys: KeyListeners,
    /// Live intersection observers.
    pub observers: ObserverRegistry,
    /// `body { overflow: hidden }` while held.
    pub scroll_lock: ScrollLock,
    /// Session history.
    pub router: Router,
    /// Messages waiting for the next processing pass.
    pub dispatcher: EventDispatcher,
    layout: LayoutEngine,
    focused: Option<NodeId>,
    alerts: Vec<String>,
    opened: Vec<String>,
}

impl Host {
    /// A blank document in a window of the given size.
    pub fn new(window: Size, initial: Location) -> Self {
        Self {
            dom: Dom::new(),
            viewport: Viewport::new(window),
            timers: TimerQueue::new(),
            keys: KeyListeners::new(),
            observers: ObserverRegistry::new(),
            scroll_lock: ScrollLock::new(),
            router: Router::new(initial),
            dispatcher: EventDispatcher::new(),
            layout: LayoutEngine::new(),
            focused: None,
            alerts: Vec::new(),
            opened: Vec::new(),
        }
    }

    // ── Layout and scrolling ─────────────────────────────────────────

    /// Lay the document out again and update the scrollable height.
    pub fn relayout(&mut self) -> Result<(), LayoutError> {
        let page = self.layout.compute(&mut self.dom, self.viewport.viewport_size)?;
        self.viewport.set_content_size(page);
        Ok(())
    }

    /// Resize the window.
    pub fn resize(&mut self, window: Size) -> Result<(), LayoutError> {
        self.viewport.set_viewport_size(window);
        self.relayout()
    }

    /// User scroll by a wheel delta. Ignored while the scroll lock is held.
    ///
    /// Returns whether the page could scroll.
    pub fn wheel(&mut self, delta_y: i32) -> bool {
        if self.scroll_lock.is_locked() {
            tracing::trace!(delta_y, "wheel ignored: scroll locked");
            return false;
        }
        self.viewport.scroll_by(0, delta_y);
        true
    }

    /// User scroll to an absolute offset. Ignored while the scroll lock is held.
    pub fn scroll_to(&mut self, y: i32) -> bool {
        if self.scroll_lock.is_locked() {
            return false;
        }
        self.viewport.scroll_to(0, y);
        true
    }

    /// `element.scrollIntoView({ behavior })` for a node.
    ///
    /// Returns `false` if the node is not part of the document.
    pub fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) -> bool {
        if !self.dom.is_connected(node) {
            return false;
        }
        let Some(region) = self.dom.get(node).map(|d| d.region) else {
            return false;
        };
        self.viewport.scroll_into_view(region, behavior);
        true
    }

    /// Smooth-scroll to the element with id `anchor` (with or without `#`).
    ///
    /// A missing element is a silent no-op; returns whether a scroll happened.
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> bool {
        let anchor = anchor.trim_start_matches('#');
        match self.dom.query_by_id(anchor) {
            Some(node) => {
                tracing::debug!(anchor, "scroll to anchor");
                self.scroll_into_view(node, ScrollBehavior::Smooth)
            }
            None => {
                tracing::debug!(anchor, "anchor not found, ignoring");
                false
            }
        }
    }

    // ── Observers and timers ─────────────────────────────────────────

    /// Compute intersection changes and post them for the next pass.
    ///
    /// Returns the number of batches posted.
    pub fn flush_intersections(&mut self) -> usize {
        let batches = self.observers.compute(&self.dom, self.viewport.visible_region());
        let count = batches.len();
        for batch in batches {
            self.dispatcher.post(batch);
        }
        count
    }

    /// Post the earliest timer due at or before `until`. Returns whether one fired.
    pub fn fire_due_timer(&mut self, until: Duration) -> bool {
        match self.timers.pop_due(until) {
            Some((_, message)) => {
                self.dispatcher.post_boxed(message);
                true
            }
            None => false,
        }
    }

    // ── Focus ────────────────────────────────────────────────────────

    /// Focus a node. Fails for detached, disabled or non-focusable nodes.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let focusable = self.dom.is_connected(node)
            && self
                .dom
                .get(node)
                .is_some_and(|d| d.focusable && !d.disabled);
        if focusable {
            self.focused = Some(node);
        }
        focusable
    }

    /// The focused node, if it is still in the document.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&n| self.dom.is_connected(n))
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    // ── Form fields ──────────────────────────────────────────────────

    /// The value of a form field, or `""` if it has none.
    pub fn value(&self, node: NodeId) -> &str {
        self.dom
            .get(node)
            .and_then(|d| d.value.as_deref())
            .unwrap_or_default()
    }

    /// Set a form field's value. Returns `false` for non-fields.
    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> bool {
        match self.dom.get_mut(node) {
            Some(data) if data.value.is_some() && !data.disabled => {
                data.value = Some(value.into());
                true
            }
            _ => false,
        }
    }

    // ── Window ───────────────────────────────────────────────────────

    /// `window.alert(text)`.
    pub fn alert(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!(%text, "alert");
        self.alerts.push(text);
    }

    /// Every alert shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// `window.open(url, "_blank")`.
    pub fn open_window(&mut self, url: impl Into<String>) {
        let url = url.into();
        tracing::info!(%url, "open new window");
        self.opened.push(url);
    }

    /// Every URL opened in a new window, oldest first.
    pub fn opened_windows(&self) -> &[String] {
        &self.opened
    }
}
