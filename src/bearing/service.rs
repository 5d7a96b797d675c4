use crate::error::BearingError;
use crate::math::Point2;

/// Computes the direction from one point to another.
///
/// Implementations return degrees in `[-180, 180)` with north at 0 and east
/// at 90. They must be pure: the same input always gives the same bearing.
/// Any closure `Fn(&Point2, &Point2) -> Result<f64, BearingError>` is a
/// service too, which is handy for injecting fixed bearings in tests.
pub trait BearingService {
    /// Bearing from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns a `BearingError` for input the service cannot handle
    /// (non-finite or coincident points, coordinates outside its domain).
    fn bearing(&self, from: &Point2, to: &Point2) -> Result<f64, BearingError>;
}

impl<F> BearingService for F
where
    F: Fn(&Point2, &Point2) -> Result<f64, BearingError>,
{
    fn bearing(&self, from: &Point2, to: &Point2) -> Result<f64, BearingError> {
        self(from, to)
    }
}

/// Maps any finite angle in degrees into `[-180, 180)`.
#[must_use]
pub fn normalize_bearing(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}
