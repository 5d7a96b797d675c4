use crate::error::{GeometryError, InvariantError, Result};
use crate::geometry::{Polyline, Ring, Segment};
use crate::math::polygon_2d::path_length;
use crate::math::Point2;

/// A stretch of the original boundary recovered for a hull edge.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPath {
    /// The boundary vertices in walking order.
    pub polyline: Polyline,
    /// Index in the ring's vertex list where the walk started.
    pub start_index: usize,
}

/// Maps a straight hull edge back onto the original, possibly concave,
/// boundary.
///
/// Both endpoints must be vertices of the ring (exact coordinates). The ring
/// is walked forward from `start` to `end` and forward from `end` to
/// `start`; the shorter walk is the boundary the hull edge stands in for.
/// On equal lengths the `start → end` walk wins.
#[derive(Debug)]
pub struct Concavify<'a> {
    segment: Segment,
    ring: &'a Ring,
}

impl<'a> Concavify<'a> {
    /// Creates a new concavify operation.
    #[must_use]
    pub fn new(segment: Segment, ring: &'a Ring) -> Self {
        Self { segment, ring }
    }

    /// Executes the operation and returns the recovered boundary polyline.
    ///
    /// # Errors
    ///
    /// See [`Concavify::execute_path`].
    pub fn execute(&self) -> Result<Polyline> {
        Ok(self.execute_path()?.polyline)
    }

    /// Executes the operation, also reporting where on the ring the path
    /// starts.
    ///
    /// # Errors
    ///
    /// - `InvariantError::VertexNotOnRing` if either endpoint is not a ring vertex
    /// - `GeometryError::Degenerate` if both endpoints are the same vertex
    pub fn execute_path(&self) -> Result<BoundaryPath> {
        let Segment { start, end } = self.segment;
        let vertices = self.ring.vertices();

        let s = self
            .ring
            .position(&start)
            .ok_or(InvariantError::VertexNotOnRing { x: start.x, y: start.y })?;
        let e = self
            .ring
            .position(&end)
            .ok_or(InvariantError::VertexNotOnRing { x: end.x, y: end.y })?;
        if s == e {
            return Err(GeometryError::Degenerate(format!(
                "hull edge collapses to the single vertex ({}, {})",
                start.x, start.y
            ))
            .into());
        }

        let forward = walk(vertices, s, &end);
        let backward = walk(vertices, e, &start);

        let (points, start_index) = if path_length(&forward) <= path_length(&backward) {
            (forward, s)
        } else {
            (backward, e)
        };
        Ok(BoundaryPath {
            polyline: Polyline::new(points)?,
            start_index,
        })
    }
}

/// Collects vertices from index `from` onward, wrapping around, up to and
/// including the first vertex equal to `to`.
fn walk(vertices: &[Point2], from: usize, to: &Point2) -> Vec<Point2> {
    let mut path = Vec::new();
    for p in vertices.iter().cycle().skip(from).take(vertices.len() + 1) {
        path.push(*p);
        if path.len() > 1 && p == to {
            break;
        }
    }
    path
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LotLineError;

    fn square() -> Ring {
        Ring::from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]).unwrap()
    }

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::new(Point2::new(a.0, a.1), Point2::new(b.0, b.1))
    }

    #[test]
    fn diagonal_tie_takes_forward_walk() {
        let ring = square();
        let path = Concavify::new(seg((0.0, 0.0), (10.0, 10.0)), &ring)
            .execute_path()
            .unwrap();
        assert_eq!(
            path.polyline.points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0)
            ]
        );
        assert_eq!(path.start_index, 0);
    }

    #[test]
    fn diagonal_tie_depends_on_segment_direction() {
        let ring = square();
        let line = Concavify::new(seg((10.0, 10.0), (0.0, 0.0)), &ring)
            .execute()
            .unwrap();
        assert_eq!(
            line.points(),
            &[
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
                Point2::new(0.0, 0.0)
            ]
        );
    }

    #[test]
    fn recovers_notch_between_hull_vertices() {
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (7.0, 5.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ])
        .unwrap();
        let line = Concavify::new(seg((10.0, 0.0), (10.0, 10.0)), &ring)
            .execute()
            .unwrap();
        assert_eq!(
            line.points(),
            &[
                Point2::new(10.0, 0.0),
                Point2::new(7.0, 5.0),
                Point2::new(10.0, 10.0)
            ]
        );
    }

    #[test]
    fn shorter_walk_may_run_backwards() {
        // Clockwise hull edge over a counter-clockwise ring: the short way is
        // the walk from `end` to `start`.
        let ring = square();
        let path = Concavify::new(seg((10.0, 0.0), (0.0, 0.0)), &ring)
            .execute_path()
            .unwrap();
        assert_eq!(
            path.polyline.points(),
            &[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]
        );
        assert_eq!(path.start_index, 0);
    }

    #[test]
    fn walk_wraps_past_the_closing_point() {
        let ring = square();
        let line = Concavify::new(seg((0.0, 10.0), (0.0, 0.0)), &ring)
            .execute()
            .unwrap();
        assert_eq!(line.points(), &[Point2::new(0.0, 10.0), Point2::new(0.0, 0.0)]);
    }

    #[test]
    fn missing_vertex_is_an_invariant_violation() {
        let ring = square();
        let err = Concavify::new(seg((0.0, 0.0), (5.0, 5.0)), &ring)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            LotLineError::Invariant(InvariantError::VertexNotOnRing { .. })
        ));
    }

    #[test]
    fn drifted_coordinate_is_not_matched() {
        let ring = square();
        let err = Concavify::new(seg((0.0, 0.0), (10.0 + 1e-9, 0.0)), &ring)
            .execute()
            .unwrap_err();
        assert!(matches!(err, LotLineError::Invariant(_)));
    }

    #[test]
    fn same_vertex_twice_is_degenerate() {
        let ring = square();
        let err = Concavify::new(seg((10.0, 0.0), (10.0, 0.0)), &ring)
            .execute()
            .unwrap_err();
        assert!(matches!(err, LotLineError::Geometry(GeometryError::Degenerate(_))));
    }
}
