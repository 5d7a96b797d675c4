use std::f64::consts::{FRAC_PI_4, PI};

use super::service::{normalize_bearing, BearingService};
use crate::error::BearingError;
use crate::math::{Point2, TOLERANCE};

/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Constant-heading (loxodrome) bearing on an ellipsoid.
///
/// Points are `(longitude, latitude)` in degrees, i.e. `x` is longitude.
/// Input in a projected system must be reprojected to geographic
/// coordinates first; that is the caller's job.
///
/// This is not the geodesic forward azimuth. The two differ by roughly
/// half the meridian convergence across the segment, which for
/// parcel-sized edges is far below the resolution of bearing
/// classification, so it stands in for the geodesic azimuth here.
#[derive(Debug, Clone, Copy)]
pub struct RhumbBearing {
    eccentricity: f64,
}

impl RhumbBearing {
    /// Rhumb bearing on the WGS84 ellipsoid.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::with_flattening(WGS84_F)
    }

    /// Rhumb bearing on a sphere (zero eccentricity).
    #[must_use]
    pub fn sphere() -> Self {
        Self { eccentricity: 0.0 }
    }

    /// Rhumb bearing on an ellipsoid of the given flattening.
    #[must_use]
    pub fn with_flattening(f: f64) -> Self {
        Self {
            eccentricity: (f * (2.0 - f)).sqrt(),
        }
    }

    /// Isometric latitude ψ of a geodetic latitude φ (radians).
    fn isometric_latitude(&self, phi: f64) -> f64 {
        let e = self.eccentricity;
        let esin = e * phi.sin();
        let conformal = ((1.0 - esin) / (1.0 + esin)).powf(e / 2.0);
        ((FRAC_PI_4 + phi / 2.0).tan() * conformal).ln()
    }
}

impl Default for RhumbBearing {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl BearingService for RhumbBearing {
    fn bearing(&self, from: &Point2, to: &Point2) -> Result<f64, BearingError> {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return Err(BearingError::NonFinite);
        }
        for lat in [from.y, to.y] {
            if lat.abs() >= 90.0 {
                return Err(BearingError::LatitudeOutOfRange(lat));
            }
        }

        let mut d_lambda = (to.x - from.x).to_radians();
        // Take the short way round the antimeridian.
        if d_lambda > PI {
            d_lambda -= 2.0 * PI;
        } else if d_lambda < -PI {
            d_lambda += 2.0 * PI;
        }
        let d_psi =
            self.isometric_latitude(to.y.to_radians()) - self.isometric_latitude(from.y.to_radians());

        if d_lambda.abs() < TOLERANCE && d_psi.abs() < TOLERANCE {
            return Err(BearingError::CoincidentPoints);
        }
        Ok(normalize_bearing(d_lambda.atan2(d_psi).to_degrees()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn due_east_and_north() {
        let svc = RhumbBearing::wgs84();
        let east = svc
            .bearing(&Point2::new(-122.6, 45.5), &Point2::new(-122.5, 45.5))
            .unwrap();
        assert_abs_diff_eq!(east, 90.0, epsilon = 1e-9);
        let north = svc
            .bearing(&Point2::new(-122.6, 45.5), &Point2::new(-122.6, 45.6))
            .unwrap();
        assert_abs_diff_eq!(north, 0.0, epsilon = 1e-9);
        let south = svc
            .bearing(&Point2::new(-122.6, 45.6), &Point2::new(-122.6, 45.5))
            .unwrap();
        assert_abs_diff_eq!(south, -180.0, epsilon = 1e-9);
    }

    /// Great-circle initial bearing on a sphere, in degrees.
    fn spherical_azimuth(from: &Point2, to: &Point2) -> f64 {
        let (phi1, phi2) = (from.y.to_radians(), to.y.to_radians());
        let d_lambda = (to.x - from.x).to_radians();
        let y = d_lambda.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
        y.atan2(x).to_degrees()
    }

    #[test]
    fn short_edges_agree_with_forward_azimuth() {
        let svc = RhumbBearing::sphere();
        let from = Point2::new(-122.6, 45.5);
        for to in [
            Point2::new(-122.599, 45.5007),
            Point2::new(-122.6012, 45.4995),
            Point2::new(-122.5991, 45.4991),
        ] {
            let rhumb = svc.bearing(&from, &to).unwrap();
            assert_abs_diff_eq!(rhumb, spherical_azimuth(&from, &to), epsilon = 1e-3);
        }
    }

    #[test]
    fn crossing_antimeridian_goes_east() {
        let svc = RhumbBearing::wgs84();
        let b = svc
            .bearing(&Point2::new(179.9, 0.0), &Point2::new(-179.9, 0.0))
            .unwrap();
        assert_abs_diff_eq!(b, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn sphere_at_equator_matches_planar_angle() {
        // At the equator ψ ≈ φ for small offsets, so a 1:1 step is ~45°.
        let b = RhumbBearing::sphere()
            .bearing(&Point2::new(0.0, 0.0), &Point2::new(0.001, 0.001))
            .unwrap();
        assert_abs_diff_eq!(b, 45.0, epsilon = 1e-3);
    }

    #[test]
    fn ellipsoid_bends_diagonal_toward_north() {
        // Isometric latitude grows faster than longitude at mid latitudes,
        // so an equal-degree diagonal points north of 45°.
        let b = RhumbBearing::wgs84()
            .bearing(&Point2::new(10.0, 50.0), &Point2::new(10.01, 50.01))
            .unwrap();
        assert!(b > 0.0 && b < 45.0, "b={b}");
    }

    #[test]
    fn pole_is_rejected() {
        let err = RhumbBearing::wgs84()
            .bearing(&Point2::new(0.0, 90.0), &Point2::new(1.0, 80.0))
            .unwrap_err();
        assert!(matches!(err, BearingError::LatitudeOutOfRange(_)));
    }

    #[test]
    fn coincident_points_fail() {
        let p = Point2::new(10.0, 10.0);
        assert!(matches!(
            RhumbBearing::default().bearing(&p, &p),
            Err(BearingError::CoincidentPoints)
        ));
    }
}
