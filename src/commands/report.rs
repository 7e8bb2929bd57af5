//! Shared flow for grouping commands: cache lookup, grouping, output

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::GroupingArgs;
use crate::config;
use crate::core::{error, GroupingParams, GroupingResult, Point};
use crate::storage::{self, cache, cache_key, GroupingRecord, Target};
use crate::ui;

/// Load input, reuse a cached result when possible, otherwise group and cache.
pub fn execute<F>(args: &GroupingArgs, target: Target, group: F) -> Result<()>
where
	F: FnOnce(&[Point], &GroupingParams) -> error::Result<GroupingResult>,
{
	let start = Instant::now();
	let params = args.params();

	let bytes = storage::read_input(&args.input)?;
	let key = cache_key(&bytes, &params, &target)?;
	let cache_dir = config::cache_dir(&args.input);
	let cache_path = cache::build_path(&cache_dir, &key);
	// Stdin has no home directory to cache next to
	let cacheable = !storage::is_stdin(&args.input);

	ui::debug(&format!(
		"Grouping by {}: min_size={}, link={:?}, invalid={:?}",
		target, params.min_group_size, params.link_mode, params.invalid_points
	));

	if !cacheable {
		ui::debug("Reading from stdin, caching disabled");
	} else if !args.force {
		if let Some(record) = cache::load(&cache_path) {
			ui::success("Using cached groups");
			ui::debug(&format!("Grouped at: {}", record.timestamp));
			ui::debug("Run with --force to regroup");
			return present(&record, args);
		}
	} else {
		ui::debug("Force flag set, skipping cache check");
	}

	let points = storage::parse_points(&bytes)?;
	ui::info(&format!("Grouping {} points by {}", points.len(), target));

	let result = group(&points, &params).context("Grouping failed")?;
	let record = GroupingRecord::new(params, target, result);

	if cacheable {
		match cache::save(&cache_dir, &key, &record) {
			Ok(path) => ui::debug(&format!("Cached result at {}", ui::path_link(&path))),
			Err(e) => ui::warn(&format!("Could not cache result: {:#}", e)),
		}
	}

	present(&record, args)?;
	eprintln!(
		"\n{}",
		format!("Completed in {:.2}s", start.elapsed().as_secs_f32()).dimmed()
	);
	Ok(())
}

fn present(record: &GroupingRecord, args: &GroupingArgs) -> Result<()> {
	match &args.export {
		Some(path) => export_result(&record.result, path),
		None => {
			print_result(&record.result, args.preview);
			Ok(())
		}
	}
}

pub fn print_result(result: &GroupingResult, preview: usize) {
	let total = result.total();
	let grouped = result.grouped_count();
	let percent = if total == 0 {
		0.0
	} else {
		grouped as f32 / total as f32 * 100.0
	};

	ui::success(&format!(
		"{} groups covering {} of {} points ({:.1}%), {} individual",
		result.groups.len(),
		grouped,
		total,
		percent,
		result.individual_points.len()
	));

	for group in &result.groups {
		eprintln!(
			"\n{} {} ({} points) at {:.5},{:.5}",
			"Group".bright_white(),
			group.id.bright_cyan(),
			group.count,
			group.centroid_lat,
			group.centroid_lng
		);

		for (i, id) in group.member_ids.iter().take(preview).enumerate() {
			eprintln!("  {} {}", format!("[{}]", i + 1).dimmed(), id);
		}

		if group.member_ids.len() > preview {
			eprintln!(
				"  {}",
				format!("... and {} more", group.member_ids.len() - preview).dimmed()
			);
		}
	}

	if !result.rejected.is_empty() {
		ui::warn(&format!(
			"{} points skipped for invalid coordinates",
			result.rejected.len()
		));
	}
}

fn export_result(result: &GroupingResult, export_path: &Path) -> Result<()> {
	let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;

	if export_path.to_str() == Some("-") || export_path.as_os_str().is_empty() {
		println!("{}", json);
	} else {
		std::fs::write(export_path, json)
			.with_context(|| format!("Failed to write {}", export_path.display()))?;
		ui::success(&format!("Exported to {}", export_path.display()));
	}

	Ok(())
}
