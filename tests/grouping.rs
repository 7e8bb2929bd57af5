// Integration tests for the grouping engine

use std::collections::HashMap;

use canopy::core::{
	prefix_for, GeohashEncoder, Geohasher, GroupingError, GroupingParams, GroupingResult,
	InvalidPointPolicy, Point,
};
use canopy::processing::{group_by_cells, group_points, threshold_for};
use proptest::prelude::*;

fn params() -> GroupingParams {
	GroupingParams::default()
}

/// Every input id must show up exactly once across groups, individual and rejected points
fn assert_partition(input: &[Point], result: &GroupingResult) {
	let mut seen: HashMap<&str, usize> = HashMap::new();
	for id in result.member_ids() {
		*seen.entry(id).or_default() += 1;
	}
	for p in result.individual_points.iter().chain(&result.rejected) {
		*seen.entry(p.id.as_str()).or_default() += 1;
	}

	assert_eq!(seen.len(), input.len(), "some points were lost or invented");
	for p in input {
		assert_eq!(seen.get(p.id.as_str()), Some(&1), "point {} not seen exactly once", p.id);
	}
}

fn sorted_ids(points: &[Point]) -> Vec<String> {
	let mut ids: Vec<String> = points.iter().map(|p| p.id.clone()).collect();
	ids.sort();
	ids
}

#[test]
fn three_close_points_form_one_group() {
	let points = vec![
		Point::new("a", 40.000, -74.000),
		Point::new("b", 40.001, -74.001),
		Point::new("c", 40.0005, -74.0005),
	];
	let prefix = prefix_for(40.0005, -74.0005, 4, &Geohasher).unwrap();

	let result = group_points(&points, &prefix, &params(), &Geohasher).unwrap();

	assert_eq!(result.groups.len(), 1);
	assert!(result.individual_points.is_empty());

	let group = &result.groups[0];
	assert_eq!(group.count, 3);
	assert!((group.centroid_lat - 40.0005).abs() < 1e-9);
	assert!((group.centroid_lng + 74.0005).abs() < 1e-9);
	assert!(group.id.starts_with(&format!("group_{}", prefix)));
	assert_eq!(group.id.len(), "group_".len() + 9);
	assert!(group.city.is_none() && group.state.is_none());
	assert_partition(&points, &result);
}

#[test]
fn two_distant_points_stay_individual() {
	// About 50km apart along a meridian
	let points = vec![Point::new("a", 40.0, -74.0), Point::new("b", 40.45, -74.0)];
	let prefix = prefix_for(40.0, -74.0, 4, &Geohasher).unwrap();

	let result = group_points(&points, &prefix, &params(), &Geohasher).unwrap();

	assert!(result.groups.is_empty());
	assert_eq!(sorted_ids(&result.individual_points), vec!["a", "b"]);
}

#[test]
fn empty_input_yields_empty_result() {
	let result = group_points(&[], "dr5r", &params(), &Geohasher).unwrap();
	assert_eq!(result, GroupingResult::default());

	let cells = group_by_cells(&[], 3, &params(), &Geohasher).unwrap();
	assert_eq!(cells, GroupingResult::default());
}

#[test]
fn fine_prefix_skips_grouping() {
	let points: Vec<Point> = (0..10)
		.map(|i| Point::new(format!("t{}", i), 40.0 + i as f64 * 1e-5, -74.0))
		.collect();

	let result = group_points(&points, "dr5re", &params(), &Geohasher).unwrap();

	assert!(result.groups.is_empty());
	assert_eq!(sorted_ids(&result.individual_points), sorted_ids(&points));
}

#[test]
fn threshold_shrinks_with_precision() {
	assert!(threshold_for(2) > threshold_for(4));
}

#[test]
fn custom_min_size_is_respected() {
	let points = vec![
		Point::new("a", 40.000, -74.000),
		Point::new("b", 40.001, -74.001),
		Point::new("c", 40.0005, -74.0005),
	];
	let prefix = prefix_for(40.0005, -74.0005, 4, &Geohasher).unwrap();
	let strict = GroupingParams {
		min_group_size: 4,
		..params()
	};

	let result = group_points(&points, &prefix, &strict, &Geohasher).unwrap();
	assert!(result.groups.is_empty());
	assert_eq!(result.individual_points.len(), 3);
}

#[test]
fn invalid_coordinates_are_rejected_or_skipped() {
	let points = vec![
		Point::new("ok", 40.0, -74.0),
		Point::new("north-of-pole", 91.0, -74.0),
	];

	let err = group_points(&points, "dr", &params(), &Geohasher).unwrap_err();
	assert_eq!(
		err,
		GroupingError::InvalidCoordinate {
			id: "north-of-pole".into(),
			lat: 91.0,
			lng: -74.0
		}
	);

	let skip = GroupingParams {
		invalid_points: InvalidPointPolicy::Skip,
		..params()
	};
	let result = group_by_cells(&points, 2, &skip, &Geohasher).unwrap();
	assert_eq!(sorted_ids(&result.rejected), vec!["north-of-pole"]);
	assert_partition(&points, &result);
}

#[test]
fn geohash_boundary_can_split_neighbours() {
	// Four points within ~70m straddling the prime meridian
	let mut points = vec![
		Point::new("w1", 0.0001, -0.0002),
		Point::new("w2", 0.0002, -0.0001),
		Point::new("e1", 0.0001, 0.0003),
		Point::new("e2", 0.0002, 0.0004),
	];

	let together = group_points(&points, "s", &params(), &Geohasher).unwrap();
	assert_eq!(together.groups.len(), 1);
	assert_eq!(together.groups[0].count, 4);

	// A far point whose geohash sorts between the two halves breaks the run
	points.push(Point::new("far", -10.0, 10.0));
	let split = group_points(&points, "s", &params(), &Geohasher).unwrap();
	assert!(split.groups.is_empty());
	assert_eq!(split.individual_points.len(), 5);
}

#[test]
fn cells_are_grouped_independently() {
	let mut points = Vec::new();
	for i in 0..4 {
		let d = i as f64 * 0.0005;
		points.push(Point::new(format!("nyc{}", i), 40.7 + d, -74.0 + d));
		points.push(Point::new(format!("sf{}", i), 37.77 + d, -122.42 + d));
	}
	points.push(Point::new("lonely", 51.5, -0.12));

	let result = group_by_cells(&points, 4, &params(), &Geohasher).unwrap();

	assert_eq!(result.groups.len(), 2);
	assert!(result.groups.iter().all(|g| g.count == 4));
	assert_eq!(sorted_ids(&result.individual_points), vec!["lonely"]);
	assert_partition(&points, &result);

	// Descending cell order: 'dr..' (New York) before '9q..' (San Francisco)
	assert!(result.groups[0].member_ids[0].starts_with("nyc"));
}

/// Stub encoder that hashes by latitude band only, making sort order predictable
struct LatitudeBands;

impl GeohashEncoder for LatitudeBands {
	fn encode(&self, lat: f64, _lng: f64, precision: usize) -> Result<String, GroupingError> {
		let band = ((lat + 90.0) * 10.0) as u64;
		let hash = format!("{:0>width$}", band, width = precision);
		Ok(hash.chars().take(precision).collect())
	}
}

#[test]
fn engine_uses_injected_encoder() {
	let points = vec![
		Point::new("a", 10.00, 0.0),
		Point::new("b", 10.001, 0.0),
		Point::new("c", 10.002, 0.0),
		Point::new("d", 20.0, 0.0),
	];
	// Latitude 10 maps to band 1000, so every hash starts with "0000"
	let result = group_points(&points, "0", &params(), &LatitudeBands).unwrap();

	assert_eq!(result.groups.len(), 1);
	assert_eq!(result.groups[0].id, "group_000001000");
	assert_eq!(sorted_ids(&result.individual_points), vec!["d"]);
}

proptest! {
	#[test]
	fn prop_partition_min_size_and_determinism(
		coords in proptest::collection::vec((40.0f64..40.05, -74.05f64..-74.0), 0..60),
		precision in 1usize..=6,
	) {
		let points: Vec<Point> = coords
			.iter()
			.enumerate()
			.map(|(i, &(lat, lng))| Point::new(format!("p{}", i), lat, lng))
			.collect();
		let prefix = prefix_for(40.025, -74.025, precision, &Geohasher).unwrap();

		let first = group_points(&points, &prefix, &params(), &Geohasher).unwrap();
		let second = group_points(&points, &prefix, &params(), &Geohasher).unwrap();
		prop_assert_eq!(&first, &second);

		assert_partition(&points, &first);
		for group in &first.groups {
			prop_assert!(group.count >= 3);
			prop_assert_eq!(group.count, group.member_ids.len());
			let expected = format!("group_{}", prefix);
			prop_assert!(group.id.starts_with(&expected), "id {} outside {}", group.id, expected);
		}
		if precision > 4 {
			prop_assert!(first.groups.is_empty());
		}

		let cells = group_by_cells(&points, precision, &params(), &Geohasher).unwrap();
		assert_partition(&points, &cells);
	}
}
