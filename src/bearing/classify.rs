/// Which of the two reference bearings an edge is aligned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Zero,
    One,
}

impl Bucket {
    /// Both buckets, in label order.
    pub const ALL: [Self; 2] = [Self::Zero, Self::One];

    /// Numeric label, 0 or 1.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }

    /// Builds a bucket from a 0/1 label; anything non-zero is `One`.
    #[must_use]
    pub fn from_label(label: u8) -> Self {
        if label == 0 {
            Self::Zero
        } else {
            Self::One
        }
    }
}

/// Smallest angle between the lines carrying bearings `a` and `b`.
///
/// Directions 180° apart lie on the same line, so the result is in
/// `[0, 90]` and identical on either side of the ±180° seam.
#[must_use]
pub fn axial_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(180.0);
    d.min(180.0 - d)
}

/// Assigns `bearing` to the reference it is closer to. Ties go to
/// [`Bucket::Zero`].
#[must_use]
pub fn assign(bearing: f64, reference: [f64; 2]) -> Bucket {
    let d0 = axial_distance(bearing, reference[0]);
    let d1 = axial_distance(bearing, reference[1]);
    if d0 <= d1 {
        Bucket::Zero
    } else {
        Bucket::One
    }
}

/// Classifies edge bearings against a fixed pair of reference bearings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BearingClassifier {
    reference: [f64; 2],
}

impl BearingClassifier {
    /// Creates a classifier for the reference pair `[r0, r1]`.
    #[must_use]
    pub fn new(reference: [f64; 2]) -> Self {
        Self { reference }
    }

    /// The reference pair.
    #[must_use]
    pub fn reference(&self) -> [f64; 2] {
        self.reference
    }

    /// Bucket of a single bearing.
    #[must_use]
    pub fn classify(&self, bearing: f64) -> Bucket {
        assign(bearing, self.reference)
    }

    /// Buckets of a sequence of bearings, in order.
    #[must_use]
    pub fn classify_all(&self, bearings: &[f64]) -> Vec<Bucket> {
        bearings.iter().map(|&b| self.classify(b)).collect()
    }
}
