//! Prep command - build the color dataset

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config;
use crate::core::Sample;
use crate::processing;
use crate::storage;
use crate::ui;

pub fn run(
    dir: &Path,
    recursive: bool,
    force: bool,
    exclude: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let start = Instant::now();

    let dataset_path = match output {
        Some(path) => path.to_path_buf(),
        None => config::dataset_path(dir),
    };

    if dataset_path.exists() && !force {
        ui::warn(&format!(
            "Dataset already exists: {} (use --force to rebuild)",
            dataset_path.display()
        ));
        return Ok(());
    }

    ui::info(&format!("Scanning: {}", dir.display()));

    let scan = processing::scan_directory(dir, recursive, exclude);

    if scan.images.is_empty() {
        ui::warn("No images found");
        if scan.excluded > 0 {
            ui::info(&format!("{} images excluded", scan.excluded));
        }
        return Ok(());
    }

    ui::info(&format!(
        "Processing {} images ({} excluded)",
        scan.images.len(),
        scan.excluded
    ));

    // Fan the per-image work out over the thread pool; collect preserves
    // scan order, which is the dataset's index space.
    let results: Vec<(PathBuf, Result<Sample>)> = scan
        .images
        .par_iter()
        .map(|path| (path.clone(), process_image(path, dir)))
        .collect();

    let mut samples = Vec::new();
    let mut errors = 0;

    for (path, result) in results {
        match result {
            Ok(sample) => samples.push(sample),
            Err(e) => {
                ui::error(&format!("Failed {}: {}", path.display(), e));
                errors += 1;
            }
        }
    }

    if samples.is_empty() {
        ui::warn("No images could be processed");
        return Ok(());
    }

    storage::save(&samples, &dataset_path)?;
    ui::success(&format!(
        "Saved {} samples to {}",
        samples.len(),
        ui::path_link(&dataset_path, 60)
    ));

    ui::log::summary(samples.len(), scan.excluded, errors, start.elapsed().as_secs_f32());

    Ok(())
}

fn process_image(path: &Path, dir: &Path) -> Result<Sample> {
    let started = Instant::now();

    let img = image::open(path).with_context(|| {
        format!(
            "Failed to open image. File may be corrupted or in an unsupported format: {}",
            path.display()
        )
    })?;

    let rgb = processing::average::average_color(&img);
    processing::thumbnail::generate(&img, path, dir)?;

    let file_name = path.file_name().context("Image path has no file name")?;
    let thumbnail = Path::new(config::THUMBNAIL_DIR).join(file_name);

    if ui::Log::is_verbose() {
        ui::log::file_processed(path, started.elapsed().as_millis());
    }

    Ok(Sample::new(label_for(path), rgb, thumbnail))
}

/// Human-readable label from the file stem; underscores become spaces
fn label_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .replace('_', " ")
}
