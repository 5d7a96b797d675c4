pub mod hull_2d;
pub mod polygon_2d;
pub mod rect_2d;
pub mod slope_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for coordinate deltas and rounded slope comparisons during
/// collinear point removal.
pub const SLOPE_TOLERANCE: f64 = 1e-6;

/// Decimal digits slopes are rounded to before the collinearity test.
pub const SLOPE_PRECISION: u32 = 2;
