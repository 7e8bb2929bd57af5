//! Geohash encoding capability
//!
//! The grouping engine never calls the `geohash` crate directly; it receives a
//! [`GeohashEncoder`] so tests can substitute a stub.

use geo_types::Coord;

use super::error::{GroupingError, Result};
use crate::config::GEOHASH_ALPHABET;

pub trait GeohashEncoder: Sync {
	fn encode(&self, lat: f64, lng: f64, precision: usize) -> Result<String>;
}

/// Production encoder backed by the `geohash` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Geohasher;

impl GeohashEncoder for Geohasher {
	fn encode(&self, lat: f64, lng: f64, precision: usize) -> Result<String> {
		::geohash::encode(Coord { x: lng, y: lat }, precision)
			.map_err(|e| GroupingError::Encode(e.to_string()))
	}
}

/// Non-empty and drawn from the base-32 geohash alphabet
pub fn validate_prefix(prefix: &str) -> Result<()> {
	if prefix.is_empty() || !prefix.chars().all(|c| GEOHASH_ALPHABET.contains(c)) {
		return Err(GroupingError::InvalidPrefix(prefix.to_string()));
	}
	Ok(())
}

/// Target prefix for the cell containing a map center
pub fn prefix_for(
	lat: f64,
	lng: f64,
	precision: usize,
	encoder: &dyn GeohashEncoder,
) -> Result<String> {
	if precision == 0 {
		return Err(GroupingError::InvalidPrefix(String::new()));
	}
	encoder.encode(lat, lng, precision)
}
