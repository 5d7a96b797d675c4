use super::Segment;
use crate::error::GeometryError;
use crate::math::hull_2d::convex_hull;
use crate::math::polygon_2d::{distinct_vertex_count, signed_area_2d};
use crate::math::rect_2d::min_rotated_rect;
use crate::math::{Point2, TOLERANCE};

/// A closed polygon boundary: the first point is repeated as the last.
///
/// Always holds at least 4 points (3 distinct vertices). The ring is assumed
/// not to self-intersect; this is not verified. Only exterior rings are
/// modelled, so a `Ring` doubles as the polygon type.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point2>,
}

impl Ring {
    /// Creates a ring from its vertices, closing it if the last point does
    /// not repeat the first. Consecutive points within [`TOLERANCE`] of each
    /// other are collapsed to the first of them, and a closing point within
    /// [`TOLERANCE`] of the first vertex is replaced by an exact copy.
    ///
    /// # Errors
    ///
    /// - `GeometryError::NonFiniteCoordinate` if a coordinate is NaN or infinite
    /// - `GeometryError::TooFewVertices` if fewer than 3 distinct vertices remain
    pub fn new(mut points: Vec<Point2>) -> Result<Self, GeometryError> {
        if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { x: p.x, y: p.y });
        }
        points.dedup_by(|a, b| (*a - *b).norm() <= TOLERANCE);
        let n = points.len();
        if n > 1 && points[0] != points[n - 1] && (points[n - 1] - points[0]).norm() <= TOLERANCE {
            points.pop();
        }
        let distinct = distinct_vertex_count(&points);
        if distinct < 3 {
            return Err(GeometryError::TooFewVertices(distinct));
        }
        if points.first() != points.last() {
            points.push(points[0]);
        }
        Ok(Self { points })
    }

    /// Creates a ring from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Ring::new`].
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self, GeometryError> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// All points including the repeated closing point.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// The vertices without the repeated closing point.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.points[..self.points.len() - 1]
    }

    /// Number of points including the closing point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A ring is never empty; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of edges (point count − 1).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Iterates the edges as segments between consecutive points.
    ///
    /// Call again to restart.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Signed area; positive when the ring runs counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(self.vertices())
    }

    /// Index of the first vertex exactly equal to `point`.
    #[must_use]
    pub fn position(&self, point: &Point2) -> Option<usize> {
        self.vertices().iter().position(|v| v == point)
    }

    /// The convex hull as a counter-clockwise ring, or `None` when the
    /// vertices are collinear.
    ///
    /// Hull vertices are exact copies of ring vertices.
    #[must_use]
    pub fn convex_hull(&self) -> Option<Self> {
        let hull = convex_hull(self.vertices());
        Self::new(hull).ok()
    }

    /// Edges of the minimum rotated bounding rectangle, counter-clockwise.
    /// Edges 0 and 1 are adjacent, so their bearings are perpendicular.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the vertices are collinear.
    pub fn mbr_edges(&self) -> Result<[Segment; 4], GeometryError> {
        let c = min_rotated_rect(self.vertices())?;
        Ok([
            Segment::new(c[0], c[1]),
            Segment::new(c[1], c[2]),
            Segment::new(c[2], c[3]),
            Segment::new(c[3], c[0]),
        ])
    }
}
