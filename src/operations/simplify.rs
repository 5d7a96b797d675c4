use tracing::trace;

use crate::error::{InvariantError, Result};
use crate::geometry::Ring;
use crate::math::slope_2d::Slope;
use crate::math::{Point2, SLOPE_PRECISION};

/// Removes vertices that are collinear with both of their neighbours.
///
/// A vertex `b` between `a` and `c` is dropped when the rounded slopes
/// `a→b`, `b→c` and `a→c` all agree. Requiring `a→c` as well keeps vertices
/// that only look collinear because rounding hides a bend across a longer
/// span.
///
/// Passes repeat until nothing more is removed. A pass that would leave
/// fewer than 4 ring points is discarded and the ring from before that pass
/// is returned.
#[derive(Debug, Clone)]
pub struct SimplifyCollinear {
    ring: Ring,
    precision: u32,
}

impl SimplifyCollinear {
    /// Creates a simplification with slopes rounded to [`SLOPE_PRECISION`]
    /// digits.
    #[must_use]
    pub fn new(ring: Ring) -> Self {
        Self {
            ring,
            precision: SLOPE_PRECISION,
        }
    }

    /// Rounds slopes to `digits` decimal places instead.
    #[must_use]
    pub fn with_precision(mut self, digits: u32) -> Self {
        self.precision = digits;
        self
    }

    /// Executes the simplification.
    ///
    /// # Errors
    ///
    /// Returns `InvariantError::SimplificationUnderflow` if the kept vertices
    /// no longer form a valid ring. With a well-formed input this does not
    /// happen.
    pub fn execute(&self) -> Result<Ring> {
        let mut current = self.ring.clone();
        loop {
            let vertices = current.vertices();
            let n = vertices.len();
            let kept: Vec<Point2> = (0..n)
                .filter(|&i| {
                    let prev = &vertices[(i + n - 1) % n];
                    let next = &vertices[(i + 1) % n];
                    !self.is_collinear(prev, &vertices[i], next)
                })
                .map(|i| vertices[i])
                .collect();

            if kept.len() == n {
                return Ok(current);
            }
            // `kept` is open; the closing point brings the ring back to +1.
            if kept.len() + 1 < 4 {
                trace!(
                    removed = n - kept.len(),
                    "collinear pass would collapse the ring, keeping previous pass"
                );
                return Ok(current);
            }

            trace!(removed = n - kept.len(), remaining = kept.len(), "collinear pass");
            let points = kept.len() + 1;
            current = Ring::new(kept)
                .map_err(|_| InvariantError::SimplificationUnderflow { points })?;
        }
    }

    fn is_collinear(&self, a: &Point2, b: &Point2, c: &Point2) -> bool {
        let ab = Slope::between(a, b).rounded(self.precision);
        let bc = Slope::between(b, c).rounded(self.precision);
        let ac = Slope::between(a, c).rounded(self.precision);
        ab.matches(bc) && ab.matches(ac)
    }
}
