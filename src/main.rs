//! Canopy - geohash-based grouping of map markers
//!
//! Precomputes marker groups from exported point data so maps of trees and
//! projects stay readable at low zoom levels.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use canopy::cli::{Cli, Command};
use canopy::{commands, config};
use canopy::ui::{self, Log};

fn main() {
	let cli = Cli::parse();
	Log::set_verbose(cli.verbose);
	if let Some(dir) = cli.cache_dir {
		config::set_cache_dir(dir);
	}

	if let Err(e) = run(cli.command) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(command: Command) -> Result<()> {
	match command {
		Command::Group {
			args,
			prefix,
			at,
			precision,
		} => {
			print_header();
			commands::group::run(&args, prefix.as_deref(), at, precision)
		}
		Command::Cells { args, precision } => {
			print_header();
			commands::cells::run(&args, precision)
		}
		Command::Threshold { precision } => commands::threshold::run(precision),
		Command::Encode { lat, lng, precision } => commands::encode::run(lat, lng, precision),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					ui::error(&format!("Unknown subcommand: {}", sub));
					cmd.print_help()?;
				}
			} else {
				ui::print_logo();
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}

fn print_header() {
	if Log::is_verbose() {
		ui::print_logo();
	}
	ui::header(&format!("─── Canopy v{} ───", env!("CARGO_PKG_VERSION")));
}
