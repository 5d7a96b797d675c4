use super::{Point2, SLOPE_TOLERANCE};

/// Slope of the line through two points.
///
/// A segment whose x-delta is within [`SLOPE_TOLERANCE`] is `Vertical`
/// regardless of direction, so no division by zero ever happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slope {
    Finite(f64),
    Vertical,
}

impl Slope {
    /// Computes the slope from `a` to `b`.
    #[must_use]
    pub fn between(a: &Point2, b: &Point2) -> Self {
        let dx = a.x - b.x;
        if dx.abs() <= SLOPE_TOLERANCE {
            return Self::Vertical;
        }
        Self::Finite((a.y - b.y) / dx)
    }

    /// Rounds a finite slope to `digits` decimal places (half away from zero).
    #[must_use]
    pub fn rounded(self, digits: u32) -> Self {
        match self {
            Self::Finite(s) => {
                let scale = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
                if !scale.is_finite() {
                    return self;
                }
                Self::Finite((s * scale).round() / scale)
            }
            Self::Vertical => Self::Vertical,
        }
    }

    /// Equality within [`SLOPE_TOLERANCE`]. Vertical only matches vertical.
    #[must_use]
    pub fn matches(self, other: Self) -> bool {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => (a - b).abs() <= SLOPE_TOLERANCE,
            (Self::Vertical, Self::Vertical) => true,
            _ => false,
        }
    }
}
