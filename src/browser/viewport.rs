//! Window scroll state.
//!
//! [`Viewport`] tracks the page scroll position against the document height,
//! clamping every move, and logs programmatic `scrollIntoView` calls so
//! callers can observe where and how the page was scrolled.

use crate::geometry::{Offset, Region, Size};

/// How a programmatic scroll is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// One programmatic scroll: the requested top edge and its behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRecord {
    pub top: i32,
    pub behavior: ScrollBehavior,
}

/// The browser window's scroll state.
///
/// The offset is always clamped to `[0, max_scroll]` where
/// `max_scroll = content_size - viewport_size` (clamped to zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Current scroll offset (`pageXOffset`, `pageYOffset`).
    pub offset: Offset,
    /// Size of the laid-out document.
    pub content_size: Size,
    /// Size of the window.
    pub viewport_size: Size,
    scroll_log: Vec<ScrollRecord>,
}

impl Viewport {
    /// Create a viewport at the top of an empty document.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            offset: Offset::new(0, 0),
            content_size: Size::ZERO,
            viewport_size,
            scroll_log: Vec::new(),
        }
    }

    /// The vertical scroll offset.
    pub fn page_y_offset(&self) -> i32 {
        self.offset.y
    }

    /// The maximum scroll offset for each axis.
    pub fn max_scroll(&self) -> Offset {
        Offset::new(
            (self.content_size.width - self.viewport_size.width).max(0),
            (self.content_size.height - self.viewport_size.height).max(0),
        )
    }

    /// Scroll to an absolute position, clamping to the valid range.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        let max = self.max_scroll();
        self.offset = Offset::new(x.clamp(0, max.x), y.clamp(0, max.y));
    }

    /// Scroll by a relative delta, clamping to the valid range.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_to(self.offset.x + dx, self.offset.y + dy);
    }

    /// Scroll so that `target`'s top edge meets the window's top edge.
    ///
    /// Records the request in the scroll log.
    pub fn scroll_into_view(&mut self, target: Region, behavior: ScrollBehavior) {
        self.scroll_to(self.offset.x, target.y);
        self.scroll_log.push(ScrollRecord {
            top: target.y,
            behavior,
        });
    }

    /// Every programmatic scroll so far, oldest first.
    pub fn scroll_log(&self) -> &[ScrollRecord] {
        &self.scroll_log
    }

    /// The currently visible part of the document, in page coordinates.
    pub fn visible_region(&self) -> Region {
        Region::new(
            self.offset.x,
            self.offset.y,
            self.viewport_size.width,
            self.viewport_size.height,
        )
    }

    /// Update the document size and re-clamp the offset.
    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        self.scroll_to(self.offset.x, self.offset.y);
    }

    /// Update the window size and re-clamp the offset.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
        self.scroll_to(self.offset.x, self.offset.y);
    }
}
