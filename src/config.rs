//! Application configuration and constants

use std::path::{Path, PathBuf};

// === Dataset ===
pub const DATASET_FILE: &str = "swatch_data.json";

// === Thumbnails ===
pub const THUMBNAIL_DIR: &str = "thumbnails";
pub const THUMBNAIL_WIDTH: u32 = 128;
pub const THUMBNAIL_HEIGHT: u32 = 80;

// === File Extensions ===
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif", "avif",
];

// === Clustering Defaults ===
pub const DEFAULT_CLUSTERS: usize = 4;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

// === Display Defaults ===
pub const DEFAULT_PREVIEW: usize = 10;
pub const REPORT_FILE: &str = "swatch_report.html";

/// Path of the dataset file inside a collection directory
pub fn dataset_path(dir: &Path) -> PathBuf {
    dir.join(DATASET_FILE)
}

/// Path of the thumbnail directory inside a collection directory
pub fn thumbnail_dir(dir: &Path) -> PathBuf {
    dir.join(THUMBNAIL_DIR)
}
