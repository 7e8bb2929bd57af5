//! Group command - group markers inside a single geohash cell

use anyhow::{bail, Result};

use crate::cli::{Coordinate, GroupingArgs};
use crate::commands::report;
use crate::core::{prefix_for, Geohasher};
use crate::processing::group_points;
use crate::storage::Target;
use crate::ui;

pub fn run(
	args: &GroupingArgs,
	prefix: Option<&str>,
	at: Option<Coordinate>,
	precision: Option<usize>,
) -> Result<()> {
	let prefix = match (prefix, at, precision) {
		(Some(prefix), _, _) => prefix.to_string(),
		(None, Some(center), Some(precision)) => {
			let prefix = prefix_for(center.lat, center.lng, precision, &Geohasher)?;
			ui::debug(&format!(
				"Map center {:.5},{:.5} is in cell '{}'",
				center.lat, center.lng, prefix
			));
			prefix
		}
		_ => bail!("Provide --prefix, or --at together with --precision"),
	};

	let target = Target::Prefix(prefix.clone());
	report::execute(args, target, |points, params| {
		group_points(points, &prefix, params, &Geohasher)
	})
}
