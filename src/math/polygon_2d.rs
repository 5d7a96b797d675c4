use super::{Point2, Vector2, TOLERANCE};

/// Computes the signed area of a closed point loop (shoelace formula).
///
/// The loop may or may not repeat its first point at the end.
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Cumulative planar length of an open point path.
#[must_use]
pub fn path_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

/// 2D cross product of `(a - o)` and `(b - o)`.
///
/// Positive when `o → a → b` turns left.
#[must_use]
pub fn cross(o: &Point2, a: &Point2, b: &Point2) -> f64 {
    let u: Vector2 = a - o;
    let v: Vector2 = b - o;
    u.x * v.y - u.y * v.x
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Number of distinct consecutive vertices, ignoring a repeated closing point.
#[must_use]
pub fn distinct_vertex_count(points: &[Point2]) -> usize {
    let mut count = 0;
    for (i, p) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        if (next - p).norm() > TOLERANCE {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_ccw() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&unit_square_ccw());
        assert!((area - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square_ccw();
        pts.reverse();
        let area = signed_area_2d(&pts);
        assert!((area + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_closed_loop_matches_open() {
        let mut pts = unit_square_ccw();
        pts.push(pts[0]);
        assert!((signed_area_2d(&pts) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn path_length_3_4_5() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(3.0, 4.0), Point2::new(3.0, 10.0)];
        assert!((path_length(&pts) - 11.0).abs() < TOLERANCE);
        assert!(path_length(&pts[..1]).abs() < TOLERANCE);
    }

    #[test]
    fn cross_sign_follows_turn() {
        let o = Point2::new(0.0, 0.0);
        let a = Point2::new(1.0, 0.0);
        assert!(cross(&o, &a, &Point2::new(1.0, 1.0)) > 0.0);
        assert!(cross(&o, &a, &Point2::new(1.0, -1.0)) < 0.0);
        assert!(cross(&o, &a, &Point2::new(2.0, 0.0)).abs() < TOLERANCE);
    }

    #[test]
    fn left_normal_basic() {
        let n = left_normal(Vector2::new(1.0, 0.0));
        assert!(n.x.abs() < TOLERANCE);
        assert!((n.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn distinct_vertices_skip_closing_point() {
        let mut pts = unit_square_ccw();
        assert_eq!(distinct_vertex_count(&pts), 4);
        pts.push(pts[0]);
        assert_eq!(distinct_vertex_count(&pts), 4);
    }
}
