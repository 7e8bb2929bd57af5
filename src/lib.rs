//! # Canopy Library
//!
//! Geohash-based grouping of map markers. Nearby points are folded into
//! aggregate groups so large maps stay interactive.
//!
//! ```
//! use canopy::core::{Geohasher, GroupingParams, Point};
//! use canopy::processing::group_points;
//!
//! let points = vec![
//!     Point::new("a", 40.000, -74.000),
//!     Point::new("b", 40.001, -74.001),
//!     Point::new("c", 40.0005, -74.0005),
//! ];
//! let prefix = canopy::core::prefix_for(40.0005, -74.0005, 4, &Geohasher).unwrap();
//! let result = group_points(&points, &prefix, &GroupingParams::default(), &Geohasher).unwrap();
//! assert_eq!(result.groups.len(), 1);
//! assert!(result.individual_points.is_empty());
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod storage;
pub mod ui;
