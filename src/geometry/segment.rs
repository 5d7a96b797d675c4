use crate::bearing::BearingService;
use crate::error::BearingError;
use crate::math::Point2;

/// A directed straight segment. Bearing depends on the order of the points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Planar length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Bearing from `start` to `end` as computed by `service`.
    ///
    /// # Errors
    ///
    /// Propagates the service's error unchanged.
    pub fn bearing<S: BearingService + ?Sized>(&self, service: &S) -> Result<f64, BearingError> {
        service.bearing(&self.start, &self.end)
    }
}
