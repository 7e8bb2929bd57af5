//! Errors raised at the grouping entry boundary

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupingError {
	#[error("invalid coordinate for point '{id}': lat={lat}, lng={lng}")]
	InvalidCoordinate { id: String, lat: f64, lng: f64 },

	#[error("invalid geohash prefix '{0}'")]
	InvalidPrefix(String),

	#[error("geohash encoding failed: {0}")]
	Encode(String),
}

pub type Result<T> = std::result::Result<T, GroupingError>;
