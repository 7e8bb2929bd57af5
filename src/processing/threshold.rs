//! Maps a geohash precision to a clustering radius

use crate::config::{BASE_THRESHOLD, COARSEST_GROUPABLE_PRECISION, THRESHOLD_BUFFER};

/// Clustering distance (degrees) for a target precision.
///
/// Each precision step below the coarsest groupable one widens the radius by 4x.
pub fn threshold_for(precision: usize) -> f64 {
	let steps = COARSEST_GROUPABLE_PRECISION as f64 - precision as f64;
	BASE_THRESHOLD * 4f64.powf(steps) * THRESHOLD_BUFFER
}

/// Finer precisions than this are never grouped
pub fn is_groupable(precision: usize) -> bool {
	precision <= COARSEST_GROUPABLE_PRECISION
}
