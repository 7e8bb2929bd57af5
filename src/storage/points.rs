//! Point file loading

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::Point;

/// Accepts a bare array or an object wrapping it under `points`
#[derive(Deserialize)]
#[serde(untagged)]
enum PointFile {
	Bare(Vec<Point>),
	Wrapped { points: Vec<Point> },
}

pub fn is_stdin(path: &Path) -> bool {
	path.to_str() == Some("-")
}

/// Read raw input bytes, `-` reads stdin
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
	if is_stdin(path) {
		let mut bytes = Vec::new();
		std::io::stdin()
			.read_to_end(&mut bytes)
			.context("Failed to read points from stdin")?;
		return Ok(bytes);
	}

	fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn parse_points(bytes: &[u8]) -> Result<Vec<Point>> {
	let file: PointFile = serde_json::from_slice(bytes).context("Failed to parse points JSON")?;
	Ok(match file {
		PointFile::Bare(points) | PointFile::Wrapped { points } => points,
	})
}
