//! Thumbnail generation

use anyhow::{Context, Result};
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{self, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};

/// Write a bounded thumbnail for `source` into the thumbnail directory
/// under `dir`, returning the path it was saved at.
///
/// Thumbnails are stored flat under one directory keyed by file name, so
/// identically named sources from different subdirectories overwrite each
/// other.
pub fn generate(img: &DynamicImage, source: &Path, dir: &Path) -> Result<PathBuf> {
	let thumb_dir = config::thumbnail_dir(dir);
	fs::create_dir_all(&thumb_dir).with_context(|| {
		format!(
			"Failed to create thumbnail directory: {}",
			thumb_dir.display()
		)
	})?;

	let file_name = source.file_name().context("Image path has no file name")?;
	let target = thumb_dir.join(file_name);

	img.thumbnail(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT)
		.save(&target)
		.with_context(|| format!("Failed to save thumbnail: {}", target.display()))?;

	Ok(target)
}
