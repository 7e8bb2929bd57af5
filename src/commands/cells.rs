//! Cells command - group markers cell by cell

use anyhow::Result;

use crate::cli::GroupingArgs;
use crate::commands::report;
use crate::core::Geohasher;
use crate::processing::{group_by_cells, is_groupable};
use crate::storage::Target;
use crate::ui;

pub fn run(args: &GroupingArgs, precision: usize) -> Result<()> {
	if !is_groupable(precision) {
		ui::warn(&format!(
			"Precision {} is too fine to group, every point stays individual",
			precision
		));
	}

	report::execute(args, Target::Cells(precision), |points, params| {
		group_by_cells(points, precision, params, &Geohasher)
	})
}
