use super::Segment;
use crate::error::GeometryError;
use crate::math::polygon_2d::path_length;
use crate::math::Point2;

/// An open polyline of straight segments.
///
/// Holds at least two points. Consecutive segments share their endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point2>,
}

impl Polyline {
    /// Creates a polyline from its vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewVertices` if fewer than 2 points are given.
    pub fn new(points: Vec<Point2>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        Ok(Self { points })
    }

    /// Joins a run of consecutive segments into one polyline.
    ///
    /// Takes the start point of every segment plus the end point of the last
    /// one, so the segments are assumed to be chained end-to-start. Returns
    /// `None` for an empty run.
    #[must_use]
    pub fn from_segments(segments: &[Segment]) -> Option<Self> {
        let last = segments.last()?;
        let mut points: Vec<Point2> = segments.iter().map(|s| s.start).collect();
        points.push(last.end);
        Some(Self { points })
    }

    /// The vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// First vertex.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.points[0]
    }

    /// Last vertex.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// The straight segment between the first and last vertex.
    #[must_use]
    pub fn chord(&self) -> Segment {
        Segment::new(self.start(), self.end())
    }

    /// Cumulative planar length.
    #[must_use]
    pub fn length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Whether `point` is one of the vertices (exact comparison).
    #[must_use]
    pub fn contains_vertex(&self, point: &Point2) -> bool {
        self.points.contains(point)
    }
}
