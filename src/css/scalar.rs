//! CSS scalar values: Scalar, Unit (px, %).

use std::fmt;

/// A CSS unit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    /// Absolute CSS pixels.
    Px,
    /// Percentage of a reference dimension.
    Percent,
}

/// A scalar value with a unit, e.g. `-50px` or `10%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f32,
    pub unit: Unit,
}

impl Scalar {
    /// Zero pixels.
    pub const ZERO: Scalar = Scalar { value: 0.0, unit: Unit::Px };

    /// Create a scalar in pixels.
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    /// Create a scalar as a percentage.
    pub fn percent(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    /// Resolve to whole pixels. Percentages are taken of `basis`.
    pub fn resolve(&self, basis: i32) -> i32 {
        match self.unit {
            Unit::Px => self.value.round() as i32,
            Unit::Percent => (self.value / 100.0 * basis as f32).round() as i32,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::Px => "px",
            Unit::Percent => "%",
        };
        if self.value.fract() == 0.0 {
            write!(f, "{}{suffix}", self.value as i64)
        } else {
            write!(f, "{}{suffix}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_display() {
        assert_eq!(Scalar::px(-50.0).to_string(), "-50px");
        assert_eq!(Scalar::px(2.5).to_string(), "2.5px");
    }

    #[test]
    fn percent_display() {
        assert_eq!(Scalar::percent(10.0).to_string(), "10%");
    }

    #[test]
    fn resolve_px_ignores_basis() {
        assert_eq!(Scalar::px(-50.0).resolve(800), -50);
    }

    #[test]
    fn resolve_percent_of_basis() {
        assert_eq!(Scalar::percent(10.0).resolve(800), 80);
        assert_eq!(Scalar::percent(-25.0).resolve(200), -50);
    }
}
