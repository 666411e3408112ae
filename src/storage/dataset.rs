//! Dataset file format and I/O

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::Sample;

/// Save the dataset as pretty-printed JSON
pub fn save(samples: &[Sample], path: &Path) -> Result<()> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent).with_context(|| {
				format!("Failed to create dataset directory: {}", parent.display())
			})?;
		}
	}

	let json = serde_json::to_string_pretty(samples).context("Failed to serialize dataset")?;
	fs::write(path, json).with_context(|| format!("Failed to write dataset: {}", path.display()))?;

	Ok(())
}

/// Load a dataset file
pub fn load(path: &Path) -> Result<Vec<Sample>> {
	let json = fs::read_to_string(path)
		.with_context(|| format!("Failed to read dataset: {}", path.display()))?;
	serde_json::from_str(&json).with_context(|| format!("Failed to parse dataset: {}", path.display()))
}
