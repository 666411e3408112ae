//! Unified logging system

use colored::*;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
   _____                __        __
  / ___/_      ______ _/ /______ / /_
  \__ \| | /| / / __ `/ __/ ___// __ \
 ___/ /| |/ |/ / /_/ / /_/ /__ / / / /
/____/ |__/|__/\__,_/\__/\___//_/ /_/ "#;

const SLOGANS: &[&str] = &[
	"Every image has a mean streak",
	"Sorting laundry, but for pixels",
	"K stands for Kolor",
	"Lloyd would be proud",
	"Beige is a personality",
	"Paint-by-numbers, in reverse",
	"#7f7f7f is a lifestyle",
	"That wall is NOT white, it's eggshell",
	"Fifty shades of your screenshots folder",
	"Group therapy for lonely centroids",
	"\"Trust me bro, it's basically teal\"",
];

pub fn random_slogan() -> &'static str {
	let idx = rand::rng().random_range(0..SLOGANS.len());
	SLOGANS[idx]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_magenta().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	println!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", text.bright_blue().bold());
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let filename = path
		.file_name()
		.and_then(|n| n.to_str())
		.unwrap_or("unknown");

	// Truncation must land on char boundaries, not byte offsets
	let count = filename.chars().count();
	let display_name = if count > max_len {
		let tail_len = (max_len / 2).saturating_sub(3);
		let head: String = filename.chars().take(max_len / 2).collect();
		let tail: String = filename.chars().skip(count - tail_len).collect();
		format!("{}...{}", head, tail)
	} else {
		filename.to_string()
	};

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, display_name)
}

/// Log a processed file with bright white filename and dimmed time
pub fn file_processed(path: &std::path::Path, duration_ms: u128) {
	let link = path_link(path, 60);
	info(&format!(
		"{} {}",
		link.bright_white(),
		format!("{}ms", duration_ms).dimmed()
	));
}

/// Prints a processing summary with statistics.
pub fn summary(processed: usize, skipped: usize, errors: usize, duration_secs: f32) {
	header("Summary");

	if processed > 0 {
		println!("  {} {}", "Processed:".bright_blue(), processed);
	}
	if skipped > 0 {
		println!("  {} {}", "Skipped:".yellow(), skipped);
	}
	if errors > 0 {
		println!("  {} {}", "Errors:".red(), errors);
	}

	println!("  {} {:.2}s", "Duration:".bright_blue(), duration_secs);
	if processed > 0 {
		let avg_ms = (duration_secs * 1000.0) / processed as f32;
		println!("  {} {:.0}ms/image", "Average:".bright_blue(), avg_ms);
	}
	println!();
}
