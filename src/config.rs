//! Application configuration and constants

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CUSTOM_CACHE_DIR: OnceLock<PathBuf> = OnceLock::new();

// === Geohash ===
/// Precision used when hashing individual points and centroids
pub const FULL_PRECISION: usize = 9;
pub const GEOHASH_ALPHABET: &str = "0123456789bcdefghjkmnpqrstuvwxyz";

// === Grouping ===
/// Roughly 1km of angular distance at the equator, in degrees
pub const BASE_THRESHOLD: f64 = 0.009;
/// Finest precision at which grouping is still attempted
pub const COARSEST_GROUPABLE_PRECISION: usize = 4;
/// Slack so borderline-adjacent points are not excluded
pub const THRESHOLD_BUFFER: f64 = 1.2;
pub const MIN_GROUP_SIZE: usize = 3;
pub const GROUP_ID_PREFIX: &str = "group_";

// === Storage ===
pub const CACHE_DIR: &str = ".canopy";
pub const CACHE_EXT: &str = "msgpack";
pub const CACHE_ENV: &str = "CANOPY_CACHE_DIR";

// === CLI Defaults ===
pub const DEFAULT_PREVIEW: usize = 5;

pub fn set_cache_dir(path: PathBuf) {
	let _ = CUSTOM_CACHE_DIR.set(path);
}

/// Resolve the cache directory for an input file.
///
/// Lookup order: programmatic override, `CANOPY_CACHE_DIR`, then a `.canopy`
/// directory next to the input.
pub fn cache_dir(input: &Path) -> PathBuf {
	if let Some(custom) = CUSTOM_CACHE_DIR.get() {
		crate::ui::debug(&format!("Using custom cache dir: {}", custom.display()));
		return custom.clone();
	}

	if let Ok(env_path) = std::env::var(CACHE_ENV) {
		if !env_path.is_empty() {
			crate::ui::debug(&format!("Using {}: {}", CACHE_ENV, env_path));
			return PathBuf::from(env_path);
		}
	}

	input
		.parent()
		.filter(|p| !p.as_os_str().is_empty())
		.unwrap_or_else(|| Path::new("."))
		.join(CACHE_DIR)
}
