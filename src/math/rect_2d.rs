use super::hull_2d::convex_hull;
use super::polygon_2d::left_normal;
use super::{Point2, TOLERANCE};
use crate::error::GeometryError;

/// Computes the minimum-area rotated rectangle enclosing `points`.
///
/// Rotating calipers: one of the rectangle's sides is collinear with a hull
/// edge, so only the hull edge directions are tried. On equal areas the
/// first hull edge wins.
///
/// Corners are returned counter-clockwise; corner 0 → 1 runs along the
/// winning hull edge direction.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the points are collinear.
pub fn min_rotated_rect(points: &[Point2]) -> Result<[Point2; 4], GeometryError> {
    let hull = convex_hull(points);
    if hull.len() < 3 {
        return Err(GeometryError::Degenerate(
            "minimum rotated rectangle of collinear points".to_owned(),
        ));
    }

    // Project relative to the first hull vertex to keep large projected
    // coordinates from eating precision.
    let origin = hull[0];
    let n = hull.len();
    let mut best: Option<(f64, [Point2; 4])> = None;

    for i in 0..n {
        let edge = hull[(i + 1) % n] - hull[i];
        let len = edge.norm();
        if len < TOLERANCE {
            continue;
        }
        let u = edge / len;
        let v = left_normal(u);

        let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let d = p - origin;
            let pu = d.dot(&u);
            let pv = d.dot(&v);
            min_u = min_u.min(pu);
            max_u = max_u.max(pu);
            min_v = min_v.min(pv);
            max_v = max_v.max(pv);
        }

        let area = (max_u - min_u) * (max_v - min_v);
        if best.as_ref().is_some_and(|(a, _)| area >= a - TOLERANCE) {
            continue;
        }

        let corner = |a: f64, b: f64| -> Point2 { origin + u * a + v * b };
        best = Some((
            area,
            [
                corner(min_u, min_v),
                corner(max_u, min_v),
                corner(max_u, max_v),
                corner(min_u, max_v),
            ],
        ));
    }

    best.map(|(_, corners)| corners).ok_or_else(|| {
        GeometryError::Degenerate("hull has no edge of non-zero length".to_owned())
    })
}
