pub mod polyline;
pub mod ring;
pub mod segment;

pub use polyline::Polyline;
pub use ring::Ring;
pub use segment::Segment;
