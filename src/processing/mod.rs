//! Grouping algorithms

pub mod distance;
pub mod grouping;
pub mod threshold;

pub use distance::approx_distance;
pub use grouping::{group_by_cells, group_points};
pub use threshold::{is_groupable, threshold_for};
