//! Directory scanning for image files

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{DATASET_FILE, IMAGE_EXTENSIONS, REPORT_FILE, THUMBNAIL_DIR};
use crate::ui;

pub struct ScanResult {
    pub images: Vec<PathBuf>,
    pub excluded: usize,
}

/// Scan a directory for image files.
///
/// Skips the tool's own output (thumbnail directory, dataset and report
/// files) and anything matching an exclude pattern. Results come back
/// sorted by filename so dataset order is reproducible across runs.
pub fn scan_directory(dir: &Path, recursive: bool, exclude: &[String]) -> ScanResult {
    let mut images = Vec::new();
    let mut excluded = 0;
    let mut seen = HashSet::new();

    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();

        if is_own_output(path) {
            continue;
        }
        if !path.is_file() || !is_image(path) {
            continue;
        }
        if is_excluded(path, exclude) {
            excluded += 1;
            ui::debug(&format!("Excluded: {}", path.display()));
            continue;
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(canonical.clone()) {
            continue;
        }

        images.push(canonical);
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));

    ScanResult { images, excluded }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn is_excluded(path: &Path, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let path_str = path.to_string_lossy().to_lowercase();
    patterns
        .iter()
        .any(|pattern| path_str.contains(&pattern.to_lowercase()))
}

fn is_own_output(path: &Path) -> bool {
    if path.components().any(|c| c.as_os_str() == THUMBNAIL_DIR) {
        return true;
    }
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some(DATASET_FILE) | Some(REPORT_FILE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_image(Path::new("flags/Ohio.PNG")));
        assert!(is_image(Path::new("flags/texas.jpeg")));
        assert!(!is_image(Path::new("flags/readme.txt")));
        assert!(!is_image(Path::new("flags/no_extension")));
    }

    #[test]
    fn exclude_patterns_match_anywhere_in_the_path() {
        let patterns = vec!["draft".to_string(), "OLD".to_string()];
        assert!(is_excluded(Path::new("flags/draft_Utah.png"), &patterns));
        assert!(is_excluded(Path::new("flags/old/Iowa.png"), &patterns));
        assert!(!is_excluded(Path::new("flags/Iowa.png"), &patterns));
        assert!(!is_excluded(Path::new("flags/Iowa.png"), &[]));
    }

    #[test]
    fn own_output_is_never_rescanned() {
        assert!(is_own_output(Path::new("flags/thumbnails/Ohio.png")));
        assert!(is_own_output(Path::new("flags/swatch_data.json")));
        assert!(is_own_output(Path::new("flags/swatch_report.html")));
        assert!(!is_own_output(Path::new("flags/Ohio.png")));
    }
}
