mod concavify;
mod lot_lines;
mod partition;
mod simplify;

pub use concavify::{BoundaryPath, Concavify};
pub use lot_lines::{ClassifiedEdge, LotLineResult, LotLines};
pub use partition::{
    count_transitions, rotate_to_split, BoundaryPartition, Partition, MIN_TRANSITIONS,
};
pub use simplify::SimplifyCollinear;
