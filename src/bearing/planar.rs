use super::service::{normalize_bearing, BearingService};
use crate::error::BearingError;
use crate::math::{Point2, TOLERANCE};

/// Grid bearing in a projected coordinate system: `atan2(dx, dy)`.
///
/// Use it when the parcels are not tied to a geographic datum, or when grid
/// north is close enough to true north for classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarBearing;

impl BearingService for PlanarBearing {
    fn bearing(&self, from: &Point2, to: &Point2) -> Result<f64, BearingError> {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return Err(BearingError::NonFinite);
        }
        let d = to - from;
        if d.norm() < TOLERANCE {
            return Err(BearingError::CoincidentPoints);
        }
        Ok(normalize_bearing(d.x.atan2(d.y).to_degrees()))
    }
}
