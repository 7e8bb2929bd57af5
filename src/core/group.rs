//! Group data structures produced by the grouping engine

use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::config::MIN_GROUP_SIZE;

/// An aggregate map marker standing in for several nearby points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
	/// `group_` followed by the centroid's full-precision geohash
	pub id: String,
	pub count: usize,
	pub centroid_lat: f64,
	pub centroid_lng: f64,
	pub member_ids: Vec<String>,
	/// Placeholder, never resolved here
	pub city: Option<String>,
	/// Placeholder, never resolved here
	pub state: Option<String>,
}

/// Partition of the input into groups, ungrouped points and rejected points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingResult {
	pub groups: Vec<Group>,
	pub individual_points: Vec<Point>,
	/// Points dropped by [`InvalidPointPolicy::Skip`]
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub rejected: Vec<Point>,
}

impl GroupingResult {
	/// Everything ungrouped, used when grouping is not attempted
	pub fn ungrouped(points: Vec<Point>) -> Self {
		Self {
			groups: Vec::new(),
			individual_points: points,
			rejected: Vec::new(),
		}
	}

	pub fn grouped_count(&self) -> usize {
		self.groups.iter().map(|g| g.count).sum()
	}

	pub fn total(&self) -> usize {
		self.grouped_count() + self.individual_points.len() + self.rejected.len()
	}

	pub fn member_ids(&self) -> impl Iterator<Item = &str> {
		self.groups
			.iter()
			.flat_map(|g| g.member_ids.iter().map(String::as_str))
	}

	pub fn extend(&mut self, other: GroupingResult) {
		self.groups.extend(other.groups);
		self.individual_points.extend(other.individual_points);
		self.rejected.extend(other.rejected);
	}
}

/// How a candidate point is tested against the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkMode {
	/// Distance to the immediately preceding point. Runs can chain beyond the threshold.
	#[default]
	Chain,
	/// Distance to the first point of the run
	FirstMember,
	/// Distance to the running centroid of the run
	Centroid,
}

/// What to do with points whose coordinates are not finite or out of range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidPointPolicy {
	#[default]
	Reject,
	Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingParams {
	pub min_group_size: usize,
	pub link_mode: LinkMode,
	pub invalid_points: InvalidPointPolicy,
}

impl Default for GroupingParams {
	fn default() -> Self {
		Self {
			min_group_size: MIN_GROUP_SIZE,
			link_mode: LinkMode::default(),
			invalid_points: InvalidPointPolicy::default(),
		}
	}
}
