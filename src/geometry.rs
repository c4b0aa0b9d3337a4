//! Core geometry types: Offset, Size, Region, Spacing.
//!
//! All values are CSS pixels in page coordinates (y grows downward, the page
//! origin is the top-left corner of the document, not of the viewport).

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total area (width * height), widened so large pages cannot overflow.
    #[inline]
    pub const fn area(self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Area in square pixels.
    #[inline]
    pub const fn area(self) -> i64 {
        self.size().area()
    }

    /// Whether the region has no area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether `other` is entirely contained within this region.
    #[inline]
    pub const fn contains_region(self, other: Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Compute the intersection of two regions.
    ///
    /// Returns [`Region::EMPTY`] if the regions do not overlap.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: w, height: h }
        }
    }

    /// Expand the region outward by a signed [`Spacing`].
    ///
    /// Negative sides pull the edge inward. Width and height are clamped to
    /// zero so a large negative margin yields an empty region, never a
    /// negative one.
    #[inline]
    pub const fn inflate(self, margin: Spacing) -> Region {
        let w = self.width + margin.left + margin.right;
        let h = self.height + margin.top + margin.bottom;
        Region {
            x: self.x - margin.left,
            y: self.y - margin.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }

    /// Fraction of this region's area that lies inside `root`, in `[0.0, 1.0]`.
    ///
    /// A zero-area region reports `1.0` when it sits inside `root` and `0.0`
    /// otherwise.
    pub fn visible_fraction(self, root: Region) -> f64 {
        if self.is_empty() {
            return if root.contains_region(self) { 1.0 } else { 0.0 };
        }
        let overlap = self.intersection(root);
        if overlap.is_empty() {
            return 0.0;
        }
        overlap.area() as f64 / self.area() as f64
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Per-side distances (top, right, bottom, left), possibly negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Create spacing in CSS order: top, right, bottom, left.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same value on every side.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_size_split_a_region() {
        let r = Region::new(1, 2, 3, 4);
        assert_eq!(r.offset(), Offset::new(1, 2));
        assert_eq!(r.size(), Size::new(3, 4));
        assert_eq!(r.area(), 12);
    }

    #[test]
    fn size_area_is_widened() {
        let size = Size::new(100_000, 100_000);
        assert_eq!(size.area(), 10_000_000_000);
    }

    #[test]
    fn intersection_overlapping() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Region::new(5, 5, 5, 5));
    }

    #[test]
    fn intersection_disjoint_is_empty() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(20, 20, 5, 5);
        assert_eq!(a.intersection(b), Region::EMPTY);
    }

    #[test]
    fn intersection_touching_edges_is_empty() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(0, 10, 10, 10);
        assert!(a.intersection(b).is_empty());
    }

    #[test]
    fn inflate_with_negative_bottom_deflates() {
        let viewport = Region::new(0, 0, 1280, 800);
        let root = viewport.inflate(Spacing::new(0, 0, -50, 0));
        assert_eq!(root, Region::new(0, 0, 1280, 750));
    }

    #[test]
    fn inflate_clamps_to_empty() {
        let r = Region::new(0, 0, 10, 10).inflate(Spacing::all(-20));
        assert!(r.is_empty());
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
    }

    #[test]
    fn visible_fraction_partial() {
        let root = Region::new(0, 0, 100, 100);
        let target = Region::new(0, 50, 100, 100);
        assert!((target.visible_fraction(root) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn visible_fraction_outside_is_zero() {
        let root = Region::new(0, 0, 100, 100);
        let target = Region::new(0, 200, 100, 100);
        assert_eq!(target.visible_fraction(root), 0.0);
    }

    #[test]
    fn visible_fraction_zero_area() {
        let root = Region::new(0, 0, 100, 100);
        assert_eq!(Region::new(10, 10, 0, 0).visible_fraction(root), 1.0);
        assert_eq!(Region::new(500, 10, 0, 0).visible_fraction(root), 0.0);
    }
}
