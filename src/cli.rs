use clap::builder::{styling, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config;

fn parse_count(s: &str) -> Result<usize, String> {
	let val: usize = s
		.parse()
		.map_err(|_| format!("'{}' is not a valid number", s))?;
	if val == 0 {
		Err("must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(styling::Style::new().bold().fg_color(Some(styling::Color::Ansi(styling::AnsiColor::Magenta))))
		.usage(styling::Style::new().bold().fg_color(Some(styling::Color::Ansi(styling::AnsiColor::Magenta))))
		.literal(styling::Style::new().fg_color(Some(styling::Color::Ansi(styling::AnsiColor::Magenta))))
		.placeholder(styling::Style::new().fg_color(Some(styling::Color::Ansi(styling::AnsiColor::Yellow))))
		.valid(styling::Style::new().fg_color(Some(styling::Color::Ansi(styling::AnsiColor::Magenta))))
		.invalid(styling::Style::new().fg_color(Some(styling::Color::Ansi(styling::AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "swatch",
	author,
	version,
	about = "Group image collections by average color",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {swatch} {prep}     {prep_args}              {prep_desc}
  {swatch} {cluster}  {cluster_args}            {cluster_desc}
  {swatch} {cluster}  {report_args}   {report_desc}
  {swatch} {help}     {help_args}                     {help_desc}",
		title = "Examples:".bright_magenta().bold(),
		swatch = "swatch".bright_magenta(),
		prep = "prep".yellow(),
		prep_args = "-d ./flags/ -r",
		prep_desc = "Build the color dataset".dimmed(),
		cluster = "cluster".yellow(),
		cluster_args = "-d ./flags/ -k 5",
		cluster_desc = "Group into 5 clusters".dimmed(),
		report_args = "--seed 42 --report out.html",
		report_desc = "Reproducible run with HTML report".dimmed(),
		help = "help".yellow(),
		help_args = "cluster",
		help_desc = "Show help for cluster".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Build the color dataset (average color + thumbnail per image)
	Prep {
		/// Directory to scan
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// Scan directories recursively
		#[arg(short = 'r', long = "recursive")]
		recursive: bool,

		/// Rebuild even if a dataset already exists
		#[arg(short = 'f', long = "force")]
		force: bool,

		/// Skip images matching these patterns (comma-separated, e.g., "draft,old")
		#[arg(long = "exclude", value_delimiter = ',')]
		exclude_patterns: Vec<String>,

		/// Write the dataset to a custom path
		#[arg(short = 'o', long = "output", value_name = "PATH")]
		output: Option<PathBuf>,
	},

	/// Group the dataset into k clusters by average color
	Cluster {
		/// Directory holding the dataset
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// Number of clusters
		#[arg(short = 'k', long = "clusters", default_value_t = config::DEFAULT_CLUSTERS, value_parser = parse_count)]
		clusters: usize,

		/// Iteration cap for the clustering loop
		#[arg(long = "max-iter", default_value_t = config::DEFAULT_MAX_ITERATIONS, value_parser = parse_count)]
		max_iterations: usize,

		/// RNG seed for reproducible runs
		#[arg(short = 's', long = "seed")]
		seed: Option<u64>,

		/// Members shown per cluster in the terminal
		#[arg(short = 'n', long = "preview", default_value_t = config::DEFAULT_PREVIEW)]
		preview: usize,

		/// Export clusters as JSON ("-" for stdout)
		#[arg(short = 'e', long = "export", value_name = "PATH")]
		export: Option<PathBuf>,

		/// Write an HTML report with a 3-D scatter plot
		#[arg(long = "report", value_name = "PATH")]
		report: Option<PathBuf>,

		/// Open the HTML report when done
		#[arg(short = 'o', long = "open")]
		open: bool,
	},

	/// Remove orphaned thumbnails
	Clean {
		/// Directory to clean
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// Also check subdirectories for source images
		#[arg(short = 'r', long = "recursive")]
		recursive: bool,

		/// Skip the confirmation prompt
		#[arg(short = 'y', long = "yes")]
		yes: bool,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
