use thiserror::Error;

/// Top-level error type for lot line extraction.
#[derive(Debug, Error)]
pub enum LotLineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    Bearing(#[from] BearingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised for malformed input geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("ring needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),

    #[error("non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error("edge index {index} is out of range for {len} edges")]
    EdgeIndexOutOfRange { index: usize, len: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Geometric preconditions that should hold by construction.
///
/// Hitting one of these means the input polygon was malformed (for example
/// self-intersecting) and the result must not be trusted.
#[derive(Debug, Error)]
pub enum InvariantError {
    #[error("vertex ({x}, {y}) is not on the original ring")]
    VertexNotOnRing { x: f64, y: f64 },

    #[error("simplification left {points} ring points, at least 4 are required")]
    SimplificationUnderflow { points: usize },
}

/// Failures reported by a bearing service.
#[derive(Debug, Error)]
pub enum BearingError {
    #[error("non-finite coordinate in bearing input")]
    NonFinite,

    #[error("bearing is undefined between coincident points")]
    CoincidentPoints,

    #[error("latitude {0} is outside the open range (-90, 90)")]
    LatitudeOutOfRange(f64),
}

/// Errors related to the parcel store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("parcel not found: {0}")]
    ParcelNotFound(String),
}

/// Convenience type alias for results using [`LotLineError`].
pub type Result<T> = std::result::Result<T, LotLineError>;
