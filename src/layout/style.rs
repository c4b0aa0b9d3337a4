//! Box style inputs and their conversion to taffy styles.
//!
//! Page markup only needs a flexbox subset: a vertical page flow, wrapping
//! rows of cards, fixed pixel or percentage sizes, padding and gaps, plus
//! out-of-flow elements for the fixed header and overlays.

use taffy::prelude::{
    Dimension, Display, FlexDirection, FlexWrap, FromLength, FromPercent, LengthPercentage,
};

use crate::css::scalar::{Scalar, Unit};
use crate::geometry::Spacing;

/// Main axis of a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

/// Layout inputs for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxStyle {
    pub direction: Direction,
    /// Wrap children onto new lines when the main axis overflows.
    pub wrap: bool,
    pub width: Option<Scalar>,
    pub height: Option<Scalar>,
    pub padding: Spacing,
    /// Gap between children on both axes, in pixels.
    pub gap: i32,
    /// `display: none`.
    pub hidden: bool,
    /// Out of flow (`position: fixed`). Does not push siblings around.
    pub fixed: bool,
}

impl BoxStyle {
    /// A vertical stack (the default flow).
    pub fn column() -> Self {
        Self::default()
    }

    /// A horizontal row that wraps its children, used for card grids.
    pub fn wrapping_row() -> Self {
        Self {
            direction: Direction::Row,
            wrap: true,
            ..Self::default()
        }
    }

    /// Set the width (builder).
    pub fn with_width(mut self, width: Scalar) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height (builder).
    pub fn with_height(mut self, height: Scalar) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the padding (builder).
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    /// Set the gap (builder).
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    /// Take the element out of flow (builder).
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }
}

fn dimension(scalar: Scalar) -> Dimension {
    match scalar.unit {
        Unit::Px => Dimension::from_length(scalar.value),
        Unit::Percent => Dimension::from_percent(scalar.value / 100.0),
    }
}

fn length(px: i32) -> LengthPercentage {
    LengthPercentage::from_length(px as f32)
}

/// Convert a [`BoxStyle`] into a [`taffy::Style`].
pub fn resolve_style(style: &BoxStyle) -> taffy::Style {
    let mut out = taffy::Style::default();

    out.display = if style.hidden { Display::None } else { Display::Flex };
    out.flex_direction = match style.direction {
        Direction::Column => FlexDirection::Column,
        Direction::Row => FlexDirection::Row,
    };
    out.flex_wrap = if style.wrap { FlexWrap::Wrap } else { FlexWrap::NoWrap };
    // Sizes are authored, never squeezed.
    out.flex_shrink = 0.0;

    if let Some(w) = style.width {
        out.size.width = dimension(w);
    }
    if let Some(h) = style.height {
        out.size.height = dimension(h);
    }

    out.padding = taffy::geometry::Rect {
        left: length(style.padding.left),
        right: length(style.padding.right),
        top: length(style.padding.top),
        bottom: length(style.padding.bottom),
    };
    out.gap = taffy::geometry::Size {
        width: length(style.gap),
        height: length(style.gap),
    };

    if style.fixed {
        out.position = taffy::style::Position::Absolute;
    }

    out
}
