mod classify;
mod planar;
mod rhumb;
mod service;

pub use classify::{assign, axial_distance, BearingClassifier, Bucket};
pub use planar::PlanarBearing;
pub use rhumb::RhumbBearing;
pub use service::{normalize_bearing, BearingService};
