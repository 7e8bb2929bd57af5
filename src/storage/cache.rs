//! Cached grouping results, keyed by input content and parameters

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::CACHE_EXT;
use crate::core::{GroupingParams, GroupingResult};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the points were grouped against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
	Prefix(String),
	Cells(usize),
}

impl std::fmt::Display for Target {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Target::Prefix(prefix) => write!(f, "prefix '{}'", prefix),
			Target::Cells(precision) => write!(f, "cells at precision {}", precision),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingRecord {
	/// Canopy version that created this
	pub version: String,
	/// When grouping was performed
	pub timestamp: String,
	pub params: GroupingParams,
	pub target: Target,
	pub result: GroupingResult,
}

impl GroupingRecord {
	pub fn new(params: GroupingParams, target: Target, result: GroupingResult) -> Self {
		Self {
			version: VERSION.to_string(),
			timestamp: chrono::Utc::now().to_rfc3339(),
			params,
			target,
			result,
		}
	}

	pub fn is_current_version(&self) -> bool {
		self.version == VERSION
	}
}

/// 16-character hex key over the input bytes and everything that affects the output
pub fn cache_key(input: &[u8], params: &GroupingParams, target: &Target) -> Result<String> {
	let mut buffer = input.to_vec();
	buffer.extend(rmp_serde::to_vec(&(params, target)).context("Failed to serialize cache key")?);
	Ok(format!("{:016x}", xxh3_64(&buffer)))
}

pub fn build_path(cache_dir: &Path, key: &str) -> PathBuf {
	cache_dir.join(format!("groups-{}.{}", key, CACHE_EXT))
}

/// Load a cached record, ignoring unreadable or outdated entries
pub fn load(path: &Path) -> Option<GroupingRecord> {
	if !path.exists() {
		return None;
	}

	let bytes = fs::read(path).ok()?;
	let record: GroupingRecord = rmp_serde::from_slice(&bytes).ok()?;
	if !record.is_current_version() {
		crate::ui::debug(&format!(
			"Ignoring cache from v{} at {}",
			record.version,
			path.display()
		));
		return None;
	}
	Some(record)
}

pub fn save(cache_dir: &Path, key: &str, record: &GroupingRecord) -> Result<PathBuf> {
	fs::create_dir_all(cache_dir).context("Failed to create cache directory")?;

	let path = build_path(cache_dir, key);
	let bytes = rmp_serde::to_vec_named(record).context("Failed to serialize grouping result")?;
	fs::write(&path, bytes).context("Failed to write cache file")?;

	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{Group, LinkMode, Point};

	fn sample() -> GroupingResult {
		GroupingResult {
			groups: vec![Group {
				id: "group_dr5regw3p".into(),
				count: 3,
				centroid_lat: 40.7,
				centroid_lng: -74.0,
				member_ids: vec!["a".into(), "b".into(), "c".into()],
				city: None,
				state: None,
			}],
			individual_points: vec![Point::new("d", 41.0, -73.0)],
			rejected: Vec::new(),
		}
	}

	#[test]
	fn key_depends_on_params_and_target() {
		let params = GroupingParams::default();
		let base = cache_key(b"[]", &params, &Target::Prefix("dr5r".into())).unwrap();

		let centroid = GroupingParams {
			link_mode: LinkMode::Centroid,
			..params
		};
		assert_ne!(base, cache_key(b"[]", &centroid, &Target::Prefix("dr5r".into())).unwrap());
		assert_ne!(base, cache_key(b"[]", &params, &Target::Cells(4)).unwrap());
		assert_ne!(base, cache_key(b"[ ]", &params, &Target::Prefix("dr5r".into())).unwrap());
		assert_eq!(base, cache_key(b"[]", &params, &Target::Prefix("dr5r".into())).unwrap());
		assert_eq!(base.len(), 16);
	}

	#[test]
	fn save_then_load() {
		let dir = tempfile::tempdir().unwrap();
		let record = GroupingRecord::new(GroupingParams::default(), Target::Prefix("dr5r".into()), sample());

		let path = save(dir.path(), "abc", &record).unwrap();
		assert_eq!(path, build_path(dir.path(), "abc"));

		let loaded = load(&path).unwrap();
		assert_eq!(loaded.result, record.result);
		assert_eq!(loaded.target, record.target);
	}

	#[test]
	fn outdated_or_corrupt_cache_is_ignored() {
		let dir = tempfile::tempdir().unwrap();
		let mut record = GroupingRecord::new(GroupingParams::default(), Target::Cells(3), sample());
		record.version = "0.0.1".into();
		let path = save(dir.path(), "old", &record).unwrap();
		assert!(load(&path).is_none());

		let junk = dir.path().join("junk.msgpack");
		fs::write(&junk, b"not msgpack").unwrap();
		assert!(load(&junk).is_none());
		assert!(load(&dir.path().join("absent.msgpack")).is_none());
	}
}
