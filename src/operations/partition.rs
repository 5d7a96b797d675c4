use tracing::debug;

use crate::bearing::Bucket;
use crate::geometry::{Polyline, Segment};

/// Minimum number of label changes along the split sequence for the hull to
/// have two well-separated pairs of opposite sides.
pub const MIN_TRANSITIONS: usize = 3;

/// Polylines grouped by bucket: `groups[0]` for [`Bucket::Zero`],
/// `groups[1]` for [`Bucket::One`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    groups: [Vec<Polyline>; 2],
}

impl Partition {
    /// A partition with no polylines.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Polylines of one bucket.
    #[must_use]
    pub fn group(&self, bucket: Bucket) -> &[Polyline] {
        &self.groups[bucket.index()]
    }

    /// Whether both groups are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Total number of polylines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Iterates `(bucket, polyline)` pairs, bucket zero first.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &Polyline)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |b| self.groups[b.index()].iter().map(move |p| (b, p)))
    }
}

/// Rotates `items` right (last element to the front) until the first and
/// last labels differ, so that no run of equal labels wraps around the end.
///
/// Returns the number of single-step rotations applied, or `None` when all
/// labels are equal and no split point exists.
pub fn rotate_to_split<T>(items: &mut [T], label: impl Fn(&T) -> Bucket) -> Option<usize> {
    let first = label(items.first()?);
    if items.iter().all(|item| label(item) == first) {
        return None;
    }
    let mut rotations = 0;
    while items.first().map(&label) == items.last().map(&label) {
        items.rotate_right(1);
        rotations += 1;
    }
    Some(rotations)
}

/// Counts adjacent label changes along `items`, not wrapping around.
pub fn count_transitions<T>(items: &[T], label: impl Fn(&T) -> Bucket) -> usize {
    items
        .windows(2)
        .filter(|w| label(&w[0]) != label(&w[1]))
        .count()
}

/// Splits a labelled hull boundary into one polyline per bucket.
///
/// Input is the hull's edges in ring order, each tagged with its bucket.
/// The sequence is cyclic.
///
/// # Algorithm
///
/// 1. All edges in one bucket: nothing to split, empty result.
/// 2. Rotate until the first and last labels differ.
/// 3. Fewer than [`MIN_TRANSITIONS`] label changes: empty result.
/// 4. Per bucket, take the first run of that bucket in the doubled sequence
///    and join its segments into one polyline.
#[derive(Debug, Clone)]
pub struct BoundaryPartition {
    edges: Vec<(Segment, Bucket)>,
}

impl BoundaryPartition {
    /// Creates a partition over the labelled edge cycle.
    #[must_use]
    pub fn new(edges: Vec<(Segment, Bucket)>) -> Self {
        Self { edges }
    }

    /// Creates a partition from parallel segment and bucket sequences.
    /// Extra items in the longer sequence are ignored.
    #[must_use]
    pub fn from_parts(segments: &[Segment], buckets: &[Bucket]) -> Self {
        Self::new(segments.iter().copied().zip(buckets.iter().copied()).collect())
    }

    /// Executes the partition.
    #[must_use]
    pub fn execute(&self) -> Partition {
        let mut edges = self.edges.clone();
        let Some(rotations) = rotate_to_split(&mut edges, |e| e.1) else {
            debug!("all hull edges share one bucket, nothing to partition");
            return Partition::empty();
        };

        let transitions = count_transitions(&edges, |e| e.1);
        if transitions < MIN_TRANSITIONS {
            debug!(transitions, "too few bucket transitions to partition the hull");
            return Partition::empty();
        }
        debug!(rotations, transitions, "partitioning hull boundary");

        let mut partition = Partition::empty();
        for bucket in Bucket::ALL {
            let run: Vec<Segment> = edges
                .iter()
                .chain(edges.iter())
                .skip_while(|e| e.1 != bucket)
                .take_while(|e| e.1 == bucket)
                .map(|e| e.0)
                .collect();
            if let Some(line) = Polyline::from_segments(&run) {
                partition.groups[bucket.index()].push(line);
            }
        }
        partition
    }
}
