use clap::{builder::Styles, ArgGroup, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{COARSEST_GROUPABLE_PRECISION, DEFAULT_PREVIEW, FULL_PRECISION, MIN_GROUP_SIZE};
use crate::core::{GroupingParams, InvalidPointPolicy, LinkMode};

/// How a candidate point is compared against the current run
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LinkArg {
	/// Previous point in geohash order (compatible with existing output)
	#[default]
	Chain,
	/// First point of the run
	FirstMember,
	/// Running centroid of the run
	Centroid,
}

impl From<LinkArg> for LinkMode {
	fn from(arg: LinkArg) -> Self {
		match arg {
			LinkArg::Chain => LinkMode::Chain,
			LinkArg::FirstMember => LinkMode::FirstMember,
			LinkArg::Centroid => LinkMode::Centroid,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
	pub lat: f64,
	pub lng: f64,
}

fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
	let (lat, lng) = s
		.split_once(',')
		.ok_or_else(|| format!("expected 'lat,lng', got '{}'", s))?;
	let lat: f64 = lat.trim().parse().map_err(|_| format!("'{}' is not a valid latitude", lat))?;
	let lng: f64 = lng.trim().parse().map_err(|_| format!("'{}' is not a valid longitude", lng))?;
	Ok(Coordinate { lat, lng })
}

fn parse_min_size(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val < 1 {
		Err("minimum group size must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn parse_precision(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !(1..=12).contains(&val) {
		Err(format!("precision must be between 1 and 12, got {}", val))
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
		.usage(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
		.literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
		.placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))))
		.valid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
		.invalid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "canopy",
	author,
	version,
	about = "Geohash-based grouping of map markers",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {canopy} {group}      {group_args}        {group_desc}
  {canopy} {group}      {group_at_args} {group_at_desc}
  {canopy} {cells}      {cells_args}    {cells_desc}
  {canopy} {threshold}  {threshold_args}                  {threshold_desc}
  {canopy} {encode}     {encode_args}              {encode_desc}",
		title = "Examples:".bright_green().bold(),
		canopy = "canopy".bright_green(),
		group = "group".yellow(),
		group_args = "-i trees.json -p dr5r",
		group_desc = "Group markers inside a cell".dimmed(),
		group_at_args = "-i trees.json --at 40.7,-74 --precision 3",
		group_at_desc = "Cell around a map center".dimmed(),
		cells = "cells".yellow(),
		cells_args = "-i trees.json --precision 4 -e -",
		cells_desc = "Group every cell, JSON to stdout".dimmed(),
		threshold = "threshold".yellow(),
		threshold_args = "",
		threshold_desc = "Show clustering radii".dimmed(),
		encode = "encode".yellow(),
		encode_args = "40.7 -74.0 -P 5",
		encode_desc = "Geohash a coordinate".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Directory for cached results (default: `.canopy` next to the input)
	#[arg(long = "cache-dir", global = true, value_name = "PATH")]
	pub cache_dir: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

/// Options shared by every grouping command
#[derive(Args, Debug, Clone)]
pub struct GroupingArgs {
	/// JSON file with points (`[{"id","lat","lng"}]`), `-` for stdin
	#[arg(short = 'i', long = "input", value_name = "PATH")]
	pub input: PathBuf,

	/// Minimum number of points per group
	#[arg(short = 'm', long = "min-size", default_value_t = MIN_GROUP_SIZE, value_parser = parse_min_size)]
	pub min_size: usize,

	/// How points join a run
	#[arg(short = 'l', long = "link", default_value = "chain")]
	pub link: LinkArg,

	/// Skip points with invalid coordinates instead of failing
	#[arg(long = "skip-invalid")]
	pub skip_invalid: bool,

	/// Ignore cached results
	#[arg(short = 'f', long = "force")]
	pub force: bool,

	/// Export result as JSON to a file, or `-` for stdout
	#[arg(short = 'e', long = "export", value_name = "PATH")]
	pub export: Option<PathBuf>,

	/// Number of members to preview per group
	#[arg(long = "preview", default_value_t = DEFAULT_PREVIEW)]
	pub preview: usize,
}

impl GroupingArgs {
	pub fn params(&self) -> GroupingParams {
		GroupingParams {
			min_group_size: self.min_size,
			link_mode: self.link.into(),
			invalid_points: if self.skip_invalid {
				InvalidPointPolicy::Skip
			} else {
				InvalidPointPolicy::Reject
			},
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Group points inside one geohash cell
	#[command(group(ArgGroup::new("target").required(true).args(["prefix", "at"])))]
	Group {
		#[command(flatten)]
		args: GroupingArgs,

		/// Target geohash prefix (its length is the grouping precision)
		#[arg(short = 'p', long = "prefix")]
		prefix: Option<String>,

		/// Derive the prefix from a map center, e.g. `40.7,-74.0`
		#[arg(long = "at", value_parser = parse_coordinate, requires = "precision", allow_hyphen_values = true)]
		at: Option<Coordinate>,

		/// Precision used with --at
		#[arg(short = 'P', long = "precision", value_parser = parse_precision)]
		precision: Option<usize>,
	},

	/// Group points cell by cell at a precision
	Cells {
		#[command(flatten)]
		args: GroupingArgs,

		/// Cell precision
		#[arg(short = 'P', long = "precision", default_value_t = COARSEST_GROUPABLE_PRECISION, value_parser = parse_precision)]
		precision: usize,
	},

	/// Show the clustering threshold per precision
	Threshold {
		/// Single precision to show
		#[arg(short = 'P', long = "precision", value_parser = parse_precision)]
		precision: Option<usize>,
	},

	/// Geohash a coordinate
	#[command(allow_negative_numbers = true)]
	Encode {
		/// Latitude in degrees
		lat: f64,

		/// Longitude in degrees
		lng: f64,

		/// Geohash length
		#[arg(short = 'P', long = "precision", default_value_t = FULL_PRECISION, value_parser = parse_precision)]
		precision: usize,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
