//! Swatch - group image collections by average color
//!
//! A command-line tool that computes each image's average color, clusters
//! the collection with k-means, and presents the result in the terminal or
//! as a standalone HTML report.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use swatch::cli::{Cli, Command};
use swatch::commands;
use swatch::ui;

fn main() -> Result<()> {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);

	match cli.command {
		Command::Prep {
			directory,
			recursive,
			force,
			exclude_patterns,
			output,
		} => {
			ui::log::print_logo();
			commands::prep::run(
				&directory,
				recursive,
				force,
				&exclude_patterns,
				output.as_deref(),
			)
		}
		Command::Cluster {
			directory,
			clusters,
			max_iterations,
			seed,
			preview,
			export,
			report,
			open,
		} => commands::cluster::run(
			&directory,
			clusters,
			max_iterations,
			seed,
			preview,
			export.as_deref(),
			report.as_deref(),
			open,
		),
		Command::Clean {
			directory,
			recursive,
			yes,
		} => commands::clean::run(&directory, recursive, yes),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					eprintln!("Unknown subcommand: {}", sub);
					cmd.print_help()?;
				}
			} else {
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}
