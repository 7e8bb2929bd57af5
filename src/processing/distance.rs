//! Planar distance approximation for short ranges

/// Equirectangular distance in degrees between two coordinates.
///
/// Longitude is scaled by the cosine of the mean latitude. Good enough inside
/// a metro area; not a great-circle distance and degrades over long ranges.
pub fn approx_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
	let mean_lat = ((lat1 + lat2) / 2.0).to_radians();
	let dx = (lng2 - lng1) * mean_lat.cos();
	let dy = lat2 - lat1;
	(dx * dx + dy * dy).sqrt()
}
