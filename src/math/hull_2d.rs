use super::polygon_2d::cross;
use super::Point2;

/// Computes the convex hull of a point set (Andrew's monotone chain).
///
/// Returns the hull as an open, counter-clockwise vertex loop starting at the
/// lexicographically smallest `(x, y)` point. Points lying on a hull edge are
/// dropped. Every returned vertex is a bit-exact copy of an input point.
///
/// Fewer than 3 returned vertices means the input is collinear or a single
/// point.
#[must_use]
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let mut pts: Vec<Point2> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
