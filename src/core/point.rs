//! Map marker input type

use serde::{Deserialize, Serialize};

use super::error::{GroupingError, Result};
use crate::processing::distance::approx_distance;

/// A single map marker (tree, project) with a stable id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub id: String,
	#[serde(alias = "latitude")]
	pub lat: f64,
	#[serde(alias = "longitude", alias = "lon")]
	pub lng: f64,
}

impl Point {
	pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
		Self { id: id.into(), lat, lng }
	}

	/// Finite and inside [-90, 90] x [-180, 180]
	pub fn is_valid(&self) -> bool {
		self.lat.is_finite()
			&& self.lng.is_finite()
			&& (-90.0..=90.0).contains(&self.lat)
			&& (-180.0..=180.0).contains(&self.lng)
	}

	pub fn validate(&self) -> Result<()> {
		if self.is_valid() {
			Ok(())
		} else {
			Err(GroupingError::InvalidCoordinate {
				id: self.id.clone(),
				lat: self.lat,
				lng: self.lng,
			})
		}
	}

	pub fn distance_to(&self, other: &Self) -> f64 {
		approx_distance(self.lat, self.lng, other.lat, other.lng)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_non_finite_and_out_of_range() {
		assert!(Point::new("a", 40.0, -74.0).validate().is_ok());
		assert!(Point::new("b", f64::NAN, 0.0).validate().is_err());
		assert!(Point::new("c", 0.0, f64::INFINITY).validate().is_err());
		assert!(Point::new("d", 90.5, 0.0).validate().is_err());
		assert!(Point::new("e", 0.0, -180.1).validate().is_err());
		assert!(Point::new("f", -90.0, 180.0).validate().is_ok());
	}

	#[test]
	fn deserializes_long_field_names() {
		let p: Point = serde_json::from_str(r#"{"id":"t1","latitude":40.5,"longitude":-73.9}"#).unwrap();
		assert_eq!(p, Point::new("t1", 40.5, -73.9));
	}
}
