//! Cluster command - group the dataset by average color

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::core::{cluster, Clustering, Color, Sample};
use crate::report;
use crate::storage;
use crate::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, Deserialize)]
struct ClusterExport {
	version: String,
	timestamp: String,
	total_images: usize,
	k: usize,
	max_iterations: usize,
	seed: Option<u64>,
	iterations: usize,
	clusters: Vec<ClusterInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClusterInfo {
	id: usize,
	size: usize,
	centroid: [f64; 3],
	hex: String,
	members: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
	dir: &Path,
	k: usize,
	max_iterations: usize,
	seed: Option<u64>,
	preview_count: usize,
	export: Option<&Path>,
	report_path: Option<&Path>,
	open_report: bool,
) -> Result<()> {
	let start = Instant::now();

	ui::debug(&format!(
		"Starting clustering: dir={}, k={}, max_iterations={}, seed={:?}",
		dir.display(),
		k,
		max_iterations,
		seed
	));

	let dataset_path = config::dataset_path(dir);
	if !dataset_path.exists() {
		ui::warn("No dataset found. Run 'swatch prep' first");
		return Ok(());
	}

	let samples = storage::load(&dataset_path)?;
	if samples.is_empty() {
		ui::warn("Dataset is empty. Run 'swatch prep' first");
		return Ok(());
	}

	ui::success(&format!("Loaded {} samples", samples.len()));

	let colors: Vec<Color> = samples.iter().map(|s| s.rgb).collect();
	let mut rng = match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let clustering = cluster(&colors, k, max_iterations, &mut rng)?;

	ui::debug(&format!(
		"Stopped after {} of {} iterations",
		clustering.iterations, max_iterations
	));
	let occupied = clustering.groups().iter().filter(|g| !g.is_empty()).count();
	ui::debug(&format!("{} of {} clusters occupied", occupied, k));

	// The report lands next to the dataset unless a path was given
	let report_target = match (report_path, open_report) {
		(Some(path), _) => Some(path.to_path_buf()),
		(None, true) => Some(dir.join(config::REPORT_FILE)),
		(None, false) => None,
	};

	if let Some(path) = &report_target {
		report::html::write_report(&samples, &clustering, dir, path)?;
		ui::success(&format!("Report written to {}", ui::path_link(path, 60)));

		if open_report {
			open::that(path)
				.with_context(|| format!("Failed to open report: {}", path.display()))?;
		}
	}

	if let Some(export_path) = export {
		return export_clusters(&samples, &clustering, k, max_iterations, seed, export_path);
	}

	print_clusters(&samples, &clustering, preview_count);
	eprintln!(
		"\n{}",
		format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed()
	);

	Ok(())
}

fn print_clusters(samples: &[Sample], clustering: &Clustering, preview_count: usize) {
	let groups = clustering.groups();
	let occupied = groups.iter().filter(|g| !g.is_empty()).count();

	ui::success(&format!(
		"{} clusters ({} occupied), {} images",
		clustering.k(),
		occupied,
		samples.len()
	));

	for (id, members) in groups.iter().enumerate() {
		let centroid = clustering.centroids[id];
		let (r, g, b) = report::display_color(id);
		let [cr, cg, cb] = centroid.to_rgb8();

		eprintln!(
			"\n{} {} ({} images)",
			"Cluster".truecolor(r, g, b).bold(),
			id.to_string().bright_cyan(),
			members.len()
		);
		eprintln!(
			"  {}: {} {}",
			"Centroid".dimmed(),
			"██".truecolor(cr, cg, cb),
			centroid.hex().bright_white()
		);

		for (i, &sample) in members.iter().take(preview_count).enumerate() {
			eprintln!(
				"  {} {}",
				format!("[{}]", i + 1).dimmed(),
				samples[sample].label
			);
		}

		if members.len() > preview_count {
			eprintln!(
				"  {}",
				format!("... and {} more", members.len() - preview_count).dimmed()
			);
		}
	}
}

fn export_clusters(
	samples: &[Sample],
	clustering: &Clustering,
	k: usize,
	max_iterations: usize,
	seed: Option<u64>,
	export_path: &Path,
) -> Result<()> {
	let clusters_info: Vec<ClusterInfo> = clustering
		.groups()
		.iter()
		.enumerate()
		.map(|(id, members)| {
			let centroid = clustering.centroids[id];
			ClusterInfo {
				id,
				size: members.len(),
				centroid: centroid.0,
				hex: centroid.hex(),
				members: members.iter().map(|&i| samples[i].label.clone()).collect(),
			}
		})
		.collect();

	let export_data = ClusterExport {
		version: VERSION.to_string(),
		timestamp: chrono::Utc::now().to_rfc3339(),
		total_images: samples.len(),
		k,
		max_iterations,
		seed,
		iterations: clustering.iterations,
		clusters: clusters_info,
	};

	let json = serde_json::to_string_pretty(&export_data)?;

	if export_path.to_str() == Some("-") || export_path.as_os_str().is_empty() {
		// Output to stdout
		println!("{}", json);
	} else {
		std::fs::write(export_path, json)?;
		ui::success(&format!("Exported to {}", export_path.display()));
	}

	Ok(())
}
