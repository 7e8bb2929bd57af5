//! Geohash-ordered proximity grouping for map markers
//!
//! Points are hashed at full precision, sorted by geohash in descending order
//! and walked once. Consecutive points within the precision's threshold form a
//! run; runs that are large enough and whose centroid falls inside the target
//! cell become groups, everything else stays ungrouped.
//!
//! Sorting by geohash only approximates spatial locality. Two points on either
//! side of a cell boundary can be metres apart yet far apart in sort order, so
//! they may end up in different runs.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::distance::approx_distance;
use super::threshold::{is_groupable, threshold_for};
use crate::config::{FULL_PRECISION, GROUP_ID_PREFIX};
use crate::core::error::{GroupingError, Result};
use crate::core::{
	validate_prefix, GeohashEncoder, Group, GroupingParams, GroupingResult, InvalidPointPolicy,
	LinkMode, Point,
};
use crate::ui;

/// Group points that fall inside the cell named by `prefix`.
///
/// The prefix length is the target precision. Prefixes finer than the coarsest
/// groupable precision return every valid point ungrouped.
pub fn group_points(
	points: &[Point],
	prefix: &str,
	params: &GroupingParams,
	encoder: &dyn GeohashEncoder,
) -> Result<GroupingResult> {
	validate_prefix(prefix)?;
	let (valid, rejected) = screen(points, params.invalid_points)?;

	let mut result = group_valid(valid, prefix, params, encoder)?;
	result.rejected = rejected;
	Ok(result)
}

/// Bucket points by their geohash cell at `precision` and group each cell.
///
/// Cells are processed in parallel; results are concatenated in descending
/// cell order.
pub fn group_by_cells(
	points: &[Point],
	precision: usize,
	params: &GroupingParams,
	encoder: &dyn GeohashEncoder,
) -> Result<GroupingResult> {
	if precision == 0 {
		return Err(GroupingError::InvalidPrefix(String::new()));
	}
	let (valid, rejected) = screen(points, params.invalid_points)?;

	let hashes = valid
		.par_iter()
		.map(|p| encoder.encode(p.lat, p.lng, precision))
		.collect::<Result<Vec<_>>>()?;

	let mut cells: BTreeMap<String, Vec<Point>> = BTreeMap::new();
	for (cell, point) in hashes.into_iter().zip(valid) {
		cells.entry(cell).or_default().push(point);
	}

	ui::debug(&format!(
		"Bucketed {} points into {} cells at precision {}",
		points.len() - rejected.len(),
		cells.len(),
		precision
	));

	let cells: Vec<(String, Vec<Point>)> = cells.into_iter().rev().collect();
	let per_cell = cells
		.into_par_iter()
		.map(|(cell, members)| group_valid(members, &cell, params, encoder))
		.collect::<Result<Vec<_>>>()?;

	let mut result = GroupingResult::default();
	for cell in per_cell {
		result.extend(cell);
	}
	result.rejected = rejected;
	Ok(result)
}

/// Split input into valid and rejected points according to the policy
fn screen(points: &[Point], policy: InvalidPointPolicy) -> Result<(Vec<Point>, Vec<Point>)> {
	let mut valid = Vec::with_capacity(points.len());
	let mut rejected = Vec::new();

	for point in points {
		match point.validate() {
			Ok(()) => valid.push(point.clone()),
			Err(e) => match policy {
				InvalidPointPolicy::Reject => return Err(e),
				InvalidPointPolicy::Skip => {
					ui::warn(&format!("Skipping {}", e));
					rejected.push(point.clone());
				}
			},
		}
	}

	Ok((valid, rejected))
}

fn group_valid(
	points: Vec<Point>,
	prefix: &str,
	params: &GroupingParams,
	encoder: &dyn GeohashEncoder,
) -> Result<GroupingResult> {
	if !is_groupable(prefix.len()) {
		ui::debug(&format!(
			"Prefix '{}' is too fine to group, returning {} points",
			prefix,
			points.len()
		));
		return Ok(GroupingResult::ungrouped(points));
	}

	if points.is_empty() {
		return Ok(GroupingResult::default());
	}

	let hashes = points
		.par_iter()
		.map(|p| encoder.encode(p.lat, p.lng, FULL_PRECISION))
		.collect::<Result<Vec<_>>>()?;

	let mut sorted: Vec<(String, Point)> = hashes.into_iter().zip(points).collect();
	sorted.sort_by(|a, b| b.0.cmp(&a.0));

	let threshold = threshold_for(prefix.len());
	let mut closer = RunCloser {
		prefix,
		min_group_size: params.min_group_size,
		encoder,
		result: GroupingResult::default(),
	};
	let mut run = Run::default();

	for (_, point) in sorted {
		if let Some(distance) = run.distance_to(&point, params.link_mode) {
			if distance > threshold {
				closer.close(std::mem::take(&mut run))?;
			}
		}
		run.push(point);
	}
	closer.close(run)?;

	ui::debug(&format!(
		"Prefix '{}': {} groups, {} individual points (threshold {:.5})",
		prefix,
		closer.result.groups.len(),
		closer.result.individual_points.len(),
		threshold
	));

	Ok(closer.result)
}

/// Contiguous run of sorted points accepted into the same candidate group
#[derive(Default)]
struct Run {
	members: Vec<Point>,
	sum_lat: f64,
	sum_lng: f64,
}

impl Run {
	fn push(&mut self, point: Point) {
		self.sum_lat += point.lat;
		self.sum_lng += point.lng;
		self.members.push(point);
	}

	fn centroid(&self) -> (f64, f64) {
		let n = self.members.len() as f64;
		(self.sum_lat / n, self.sum_lng / n)
	}

	/// Distance from the candidate to the run's anchor, `None` for an empty run
	fn distance_to(&self, point: &Point, mode: LinkMode) -> Option<f64> {
		match mode {
			LinkMode::Chain => self.members.last().map(|last| last.distance_to(point)),
			LinkMode::FirstMember => self.members.first().map(|first| first.distance_to(point)),
			LinkMode::Centroid => {
				if self.members.is_empty() {
					return None;
				}
				let (lat, lng) = self.centroid();
				Some(approx_distance(lat, lng, point.lat, point.lng))
			}
		}
	}
}

struct RunCloser<'a> {
	prefix: &'a str,
	min_group_size: usize,
	encoder: &'a dyn GeohashEncoder,
	result: GroupingResult,
}

impl RunCloser<'_> {
	fn close(&mut self, run: Run) -> Result<()> {
		if run.members.is_empty() {
			return Ok(());
		}

		if run.members.len() < self.min_group_size {
			self.result.individual_points.extend(run.members);
			return Ok(());
		}

		let (lat, lng) = run.centroid();
		let centroid_hash = self.encoder.encode(lat, lng, FULL_PRECISION)?;

		if !centroid_hash.starts_with(self.prefix) {
			ui::debug(&format!(
				"Run of {} left ungrouped, centroid {} is outside '{}'",
				run.members.len(),
				centroid_hash,
				self.prefix
			));
			self.result.individual_points.extend(run.members);
			return Ok(());
		}

		self.result.groups.push(Group {
			id: format!("{}{}", GROUP_ID_PREFIX, centroid_hash),
			count: run.members.len(),
			centroid_lat: lat,
			centroid_lng: lng,
			member_ids: run.members.into_iter().map(|p| p.id).collect(),
			city: None,
			state: None,
		});
		Ok(())
	}
}
