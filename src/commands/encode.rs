//! Encode command - geohash a single coordinate

use anyhow::{Context, Result};

use crate::core::{GeohashEncoder, Geohasher, Point};

pub fn run(lat: f64, lng: f64, precision: usize) -> Result<()> {
	Point::new("input", lat, lng).validate()?;
	let hash = Geohasher
		.encode(lat, lng, precision)
		.context("Failed to encode coordinate")?;
	println!("{}", hash);
	Ok(())
}
