//! Core domain types

pub mod error;
pub mod geohash;
pub mod group;
pub mod point;

pub use error::GroupingError;
pub use self::geohash::{prefix_for, validate_prefix, GeohashEncoder, Geohasher};
pub use group::{Group, GroupingParams, GroupingResult, InvalidPointPolicy, LinkMode};
pub use point::Point;
