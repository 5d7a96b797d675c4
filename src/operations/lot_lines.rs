use tracing::{debug, trace};

use super::concavify::Concavify;
use super::partition::BoundaryPartition;
use super::simplify::SimplifyCollinear;
use crate::bearing::{BearingClassifier, BearingService, Bucket};
use crate::error::{BearingError, Result};
use crate::geometry::{Polyline, Ring, Segment};
use crate::math::SLOPE_PRECISION;

/// A boundary polyline of the original parcel, tagged with the reference
/// bearing it aligns with.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEdge {
    /// The recovered (possibly concave) boundary path.
    pub polyline: Polyline,
    /// Which reference bearing the hull edge was assigned to.
    pub bucket: Bucket,
    /// Index of the first polyline vertex in the parcel ring.
    pub start_index: usize,
}

/// Outcome of lot line extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum LotLineResult {
    /// The convex hull has 3 or fewer edges; there is nothing to classify.
    NotClassifiable,
    /// Classified boundary edges, bucket zero first. Empty when the hull
    /// could not be split into two bearing groups.
    Classified(Vec<ClassifiedEdge>),
}

impl LotLineResult {
    /// The classified edges, or an empty slice when not classifiable.
    #[must_use]
    pub fn edges(&self) -> &[ClassifiedEdge] {
        match self {
            Self::NotClassifiable => &[],
            Self::Classified(edges) => edges,
        }
    }

    /// Whether the shape was rejected before classification.
    #[must_use]
    pub fn is_classifiable(&self) -> bool {
        matches!(self, Self::Classified(_))
    }
}

/// Extracts bearing-classified lot lines from a parcel polygon.
///
/// # Algorithm
///
/// 1. Convex hull of the parcel; 3 or fewer edges is not classifiable.
/// 2. Reference bearings: the first two (adjacent) edges of the parcel's
///    minimum rotated rectangle, unless supplied by the caller.
/// 3. Bearings and buckets of the raw hull edges.
/// 4. Collinear point removal on the hull.
/// 5. Bearings and buckets of the simplified hull edges.
/// 6. Boundary partition of the labelled simplified hull.
/// 7. Each partition polyline is mapped back onto the parcel ring.
#[derive(Debug, Clone)]
pub struct LotLines {
    ring: Ring,
    reference: Option<[f64; 2]>,
    precision: u32,
}

impl LotLines {
    /// Creates a new lot line extraction for `ring`.
    #[must_use]
    pub fn new(ring: Ring) -> Self {
        Self {
            ring,
            reference: None,
            precision: SLOPE_PRECISION,
        }
    }

    /// Uses `reference` instead of the bounding rectangle's bearings.
    #[must_use]
    pub fn with_reference_bearings(mut self, reference: [f64; 2]) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Slope rounding used by the hull simplification.
    #[must_use]
    pub fn with_precision(mut self, digits: u32) -> Self {
        self.precision = digits;
        self
    }

    /// Executes the extraction, computing every bearing with `service`.
    ///
    /// # Errors
    ///
    /// - `LotLineError::Bearing` if the service fails on any edge
    /// - `LotLineError::Invariant` if a hull vertex cannot be found on the ring
    ///   or simplification breaks the ring
    /// - `LotLineError::Geometry` if the bounding rectangle is degenerate
    pub fn execute<S: BearingService + ?Sized>(&self, service: &S) -> Result<LotLineResult> {
        // Step 1: Convex hull.
        let Some(hull) = self.ring.convex_hull() else {
            debug!("parcel is collinear, no convex hull");
            return Ok(LotLineResult::NotClassifiable);
        };
        trace!(?hull, "parcel convex hull");
        if hull.edge_count() <= 3 {
            debug!(edges = hull.edge_count(), "convex hull has 3 or fewer sides");
            return Ok(LotLineResult::NotClassifiable);
        }

        // Step 2: Reference bearings.
        let classifier = BearingClassifier::new(self.reference_bearings(service)?);
        trace!(reference = ?classifier.reference(), "reference bearings");

        // Step 3: Raw hull bearings.
        let raw = labelled_edges(&hull, &classifier, service)?;
        trace!(buckets = ?raw.iter().map(|e| e.1).collect::<Vec<_>>(), "raw hull buckets");

        // Step 4: Simplify.
        let simplified = SimplifyCollinear::new(hull)
            .with_precision(self.precision)
            .execute()?;
        trace!(?simplified, "simplified hull");

        // Step 5: Simplified hull bearings.
        let edges = labelled_edges(&simplified, &classifier, service)?;
        trace!(buckets = ?edges.iter().map(|e| e.1).collect::<Vec<_>>(), "simplified hull buckets");

        // Step 6: Partition.
        let partition = BoundaryPartition::new(edges).execute();

        // Step 7: Concave recovery.
        let mut result = Vec::with_capacity(partition.len());
        for (bucket, line) in partition.iter() {
            let path = Concavify::new(line.chord(), &self.ring).execute_path()?;
            result.push(ClassifiedEdge {
                polyline: path.polyline,
                bucket,
                start_index: path.start_index,
            });
        }
        debug!(lines = result.len(), "lot lines extracted");
        Ok(LotLineResult::Classified(result))
    }

    fn reference_bearings<S: BearingService + ?Sized>(
        &self,
        service: &S,
    ) -> Result<[f64; 2]> {
        if let Some(reference) = self.reference {
            return Ok(reference);
        }
        let mbr = self.ring.mbr_edges()?;
        Ok([mbr[0].bearing(service)?, mbr[1].bearing(service)?])
    }
}

/// Hull edges with their buckets, in ring order.
fn labelled_edges<S: BearingService + ?Sized>(
    ring: &Ring,
    classifier: &BearingClassifier,
    service: &S,
) -> std::result::Result<Vec<(Segment, Bucket)>, BearingError> {
    ring.segments()
        .map(|seg| Ok((seg, classifier.classify(seg.bearing(service)?))))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::bearing::PlanarBearing;
    use crate::error::LotLineError;
    use crate::math::Point2;

    /// Six vertices, one reflex corner at (7, 5) and a collinear vertex at
    /// (0, 5); the convex hull is the 10 x 10 square.
    fn notched_parcel() -> Ring {
        Ring::from_coords(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (7.0, 5.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 5.0),
        ])
        .unwrap()
    }

    #[test]
    fn triangle_is_not_classifiable() {
        let ring = Ring::from_coords(&[(0.0, 0.0), (10.0, 0.0), (3.0, 8.0)]).unwrap();
        let result = LotLines::new(ring).execute(&PlanarBearing).unwrap();
        assert_eq!(result, LotLineResult::NotClassifiable);
        assert!(!result.is_classifiable());
        assert!(result.edges().is_empty());
    }

    #[test]
    fn concave_polygon_with_triangular_hull_is_not_classifiable() {
        let ring = Ring::from_coords(&[(0.0, 0.0), (10.0, 0.0), (4.0, 2.0), (3.0, 8.0)]).unwrap();
        let result = LotLines::new(ring).execute(&PlanarBearing).unwrap();
        assert_eq!(result, LotLineResult::NotClassifiable);
    }

    #[test]
    fn notched_parcel_gives_two_lines_with_reflex_vertex() {
        let result = LotLines::new(notched_parcel())
            .execute(&PlanarBearing)
            .unwrap();
        let edges = result.edges();
        assert_eq!(edges.len(), 2);

        assert_eq!(edges[0].bucket, Bucket::Zero);
        assert_eq!(
            edges[0].polyline.points(),
            &[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]
        );
        assert_eq!(edges[0].start_index, 0);

        assert_eq!(edges[1].bucket, Bucket::One);
        assert_eq!(
            edges[1].polyline.points(),
            &[
                Point2::new(10.0, 0.0),
                Point2::new(7.0, 5.0),
                Point2::new(10.0, 10.0)
            ]
        );
        assert_eq!(edges[1].start_index, 1);
        assert!(edges[1].polyline.contains_vertex(&Point2::new(7.0, 5.0)));
    }

    #[test]
    fn supplied_reference_bearings_swap_buckets() {
        let result = LotLines::new(notched_parcel())
            .with_reference_bearings([0.0, 90.0])
            .execute(&PlanarBearing)
            .unwrap();
        let edges = result.edges();
        assert_eq!(edges.len(), 2);
        // The first zero run is now the east side (bearing 0 / north).
        assert_eq!(edges[0].bucket, Bucket::Zero);
        assert!(edges[0].polyline.contains_vertex(&Point2::new(7.0, 5.0)));
        assert_eq!(edges[1].bucket, Bucket::One);
        assert_eq!(
            edges[1].polyline.points(),
            &[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]
        );
    }

    #[test]
    fn single_bucket_hull_is_empty() {
        // Both references equal: every edge ties into bucket zero.
        let result = LotLines::new(notched_parcel())
            .with_reference_bearings([45.0, 45.0])
            .execute(&PlanarBearing)
            .unwrap();
        assert_eq!(result, LotLineResult::Classified(Vec::new()));
        assert!(result.is_classifiable());
    }

    #[test]
    fn near_duplicate_vertex_does_not_break_bearings() {
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (10.0 - 1e-11, 10.0 + 1e-11),
            (0.0, 10.0),
        ])
        .unwrap();
        let result = LotLines::new(ring).execute(&PlanarBearing).unwrap();
        let edges = result.edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(
            edges[0].polyline.points(),
            &[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]
        );
        assert_eq!(
            edges[1].polyline.points(),
            &[Point2::new(10.0, 0.0), Point2::new(10.0, 10.0)]
        );
    }

    #[test]
    fn bearing_failure_propagates() {
        let failing = |_: &Point2, _: &Point2| -> std::result::Result<f64, BearingError> {
            Err(BearingError::NonFinite)
        };
        let err = LotLines::new(notched_parcel()).execute(&failing).unwrap_err();
        assert!(matches!(err, LotLineError::Bearing(BearingError::NonFinite)));
    }

    #[test]
    fn collinear_ring_vertex_stays_in_recovered_line() {
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (0.0, 10.0),
        ])
        .unwrap();
        let result = LotLines::new(ring).execute(&PlanarBearing).unwrap();
        let edges = result.edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(
            edges[0].polyline.points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(20.0, 0.0)
            ]
        );
        assert_eq!(
            edges[1].polyline.points(),
            &[Point2::new(20.0, 0.0), Point2::new(20.0, 10.0)]
        );
    }

    #[test]
    fn near_collinear_hull_vertex_is_simplified_then_recovered() {
        // (10, -0.01) is a hull vertex whose neighbouring slopes round to 0.
        let ring = Ring::from_coords(&[
            (0.0, 0.0),
            (10.0, -0.01),
            (20.0, 0.0),
            (20.0, 10.0),
            (0.0, 10.0),
        ])
        .unwrap();
        let result = LotLines::new(ring).execute(&PlanarBearing).unwrap();
        let edges = result.edges();
        assert_eq!(edges.len(), 2);

        assert_eq!(edges[0].bucket, Bucket::Zero);
        assert_eq!(
            edges[0].polyline.points(),
            &[Point2::new(20.0, 0.0), Point2::new(20.0, 10.0)]
        );
        assert_eq!(edges[0].start_index, 2);

        assert_eq!(edges[1].bucket, Bucket::One);
        assert_eq!(
            edges[1].polyline.points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, -0.01),
                Point2::new(20.0, 0.0)
            ]
        );
    }
}
