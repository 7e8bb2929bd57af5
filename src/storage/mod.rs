//! Point input and grouping result cache

pub mod cache;
pub mod points;

pub use cache::{cache_key, GroupingRecord, Target};
pub use points::{is_stdin, parse_points, read_input};
