//! Threshold command - show clustering radii per precision

use anyhow::Result;
use colored::*;

use crate::config::FULL_PRECISION;
use crate::processing::{is_groupable, threshold_for};
use crate::ui;

/// Kilometres per degree at the equator
const KM_PER_DEGREE: f64 = 111.32;

pub fn run(precision: Option<usize>) -> Result<()> {
	let precisions: Vec<usize> = match precision {
		Some(p) => vec![p],
		None => (1..=FULL_PRECISION).collect(),
	};

	ui::header("Thresholds");
	let columns = format!("  {:>9}  {:>12}  {:>10}  {}", "Precision", "Degrees", "~km", "Groupable");
	println!("{}", columns.bright_white());

	for p in precisions {
		let threshold = threshold_for(p);
		let groupable = if is_groupable(p) {
			"yes".bright_green()
		} else {
			"no".dimmed()
		};
		println!(
			"  {:>9}  {:>12.6}  {:>10.3}  {}",
			p,
			threshold,
			threshold * KM_PER_DEGREE,
			groupable
		);
	}

	Ok(())
}
