pub mod bearing;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod parcel;

pub use error::{LotLineError, Result};
