//! # Command Implementations
//!
//! Each submodule handles one CLI command (group, cells, threshold, encode).

pub mod cells;
pub mod encode;
pub mod group;
pub mod report;
pub mod threshold;
