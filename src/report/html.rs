//! Standalone HTML report with a 3-D scatter of the clustered dataset

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Clustering, Sample};
use crate::report::palette;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Swatch report</title>
<script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 1100px; color: #222; }
h1 { margin-bottom: 0.2rem; }
.meta { color: #777; }
#plot { width: 100%; height: 700px; }
.cluster h2 { border-left: 10px solid #ccc; padding-left: 0.6rem; }
.cluster .swatch { display: inline-block; width: 1em; height: 1em; border: 1px solid #aaa; vertical-align: middle; }
.grid { display: flex; flex-wrap: wrap; gap: 12px; }
.grid figure { margin: 0; width: 140px; text-align: center; }
.grid img { max-width: 128px; max-height: 80px; border: 1px solid #ddd; }
.grid figcaption { font-size: 0.85rem; color: #444; }
</style>
</head>
<body>
<h1>Swatch report</h1>
<p class="meta">__SUMMARY__</p>
<div id="plot"></div>
__CLUSTERS__
<script>
const traces = __TRACES__;
const layout = __LAYOUT__;
Plotly.newPlot("plot", traces, layout);
</script>
</body>
</html>
"#;

#[derive(Serialize, Default)]
struct Trace {
	x: Vec<f64>,
	y: Vec<f64>,
	z: Vec<f64>,
	mode: &'static str,
	#[serde(rename = "type")]
	kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	name: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	text: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	textposition: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	marker: Option<Marker>,
	#[serde(skip_serializing_if = "Option::is_none")]
	line: Option<Line>,
	#[serde(skip_serializing_if = "Option::is_none")]
	showlegend: Option<bool>,
}

#[derive(Serialize)]
struct Marker {
	size: u32,
	color: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	symbol: Option<&'static str>,
}

#[derive(Serialize)]
struct Line {
	color: String,
	width: u32,
}

#[derive(Serialize)]
struct Axis {
	title: &'static str,
	range: [f64; 2],
}

#[derive(Serialize)]
struct Scene {
	xaxis: Axis,
	yaxis: Axis,
	zaxis: Axis,
}

#[derive(Serialize)]
struct Margin {
	l: u32,
	r: u32,
	b: u32,
	t: u32,
}

#[derive(Serialize)]
struct Layout {
	scene: Scene,
	margin: Margin,
	height: u32,
}

/// Render the report and write it to `path`.
///
/// `dir` is the collection directory holding the thumbnails. A report
/// saved there keeps the dataset's relative thumbnail paths and stays
/// portable alongside them; a report target anywhere else gets its
/// thumbnail sources rebased to absolute `file://` URIs so the images
/// remain resolvable.
pub fn write_report(samples: &[Sample], clustering: &Clustering, dir: &Path, path: &Path) -> Result<()> {
	let parent = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	};
	let base = if same_location(&parent, dir) { None } else { Some(dir) };

	let html = render(samples, clustering, base)?;
	fs::write(path, html).with_context(|| format!("Failed to write report: {}", path.display()))?;
	Ok(())
}

/// Render the full report page as a string.
///
/// `thumbnail_base` rebases thumbnail sources onto the collection
/// directory; `None` keeps the relative paths stored in the dataset.
pub fn render(
	samples: &[Sample],
	clustering: &Clustering,
	thumbnail_base: Option<&Path>,
) -> Result<String> {
	let traces = serde_json::to_string(&build_traces(samples, clustering))
		.context("Failed to serialize plot traces")?
		.replace("</", "<\\/");
	let layout = serde_json::to_string(&build_layout()).context("Failed to serialize plot layout")?;

	let summary = format!("{} images in {} clusters", samples.len(), clustering.k());

	Ok(TEMPLATE
		.replace("__SUMMARY__", &summary)
		.replace("__CLUSTERS__", &cluster_sections(samples, clustering, thumbnail_base))
		.replace("__TRACES__", &traces)
		.replace("__LAYOUT__", &layout))
}

fn same_location(a: &Path, b: &Path) -> bool {
	let resolve = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
	resolve(a) == resolve(b)
}

fn build_traces(samples: &[Sample], clustering: &Clustering) -> Vec<Trace> {
	let groups = clustering.groups();
	let mut traces = Vec::new();

	for (id, members) in groups.iter().enumerate() {
		let color = palette::css(id);
		let centroid = clustering.centroids[id];

		// Labelled member markers
		traces.push(Trace {
			x: members.iter().map(|&i| samples[i].rgb.r()).collect(),
			y: members.iter().map(|&i| samples[i].rgb.g()).collect(),
			z: members.iter().map(|&i| samples[i].rgb.b()).collect(),
			mode: "markers+text",
			kind: "scatter3d",
			name: Some(format!("Cluster {id}")),
			text: members.iter().map(|&i| samples[i].label.clone()).collect(),
			textposition: Some("top center"),
			marker: Some(Marker {
				size: 6,
				color: color.clone(),
				symbol: None,
			}),
			..Default::default()
		});

		// One line from each member to its centroid
		for &i in members {
			traces.push(Trace {
				x: vec![samples[i].rgb.r(), centroid.r()],
				y: vec![samples[i].rgb.g(), centroid.g()],
				z: vec![samples[i].rgb.b(), centroid.b()],
				mode: "lines",
				kind: "scatter3d",
				line: Some(Line {
					color: color.clone(),
					width: 2,
				}),
				showlegend: Some(false),
				..Default::default()
			});
		}

		traces.push(Trace {
			x: vec![centroid.r()],
			y: vec![centroid.g()],
			z: vec![centroid.b()],
			mode: "markers",
			kind: "scatter3d",
			name: Some(format!("Centroid {id}")),
			marker: Some(Marker {
				size: 10,
				color,
				symbol: Some("diamond"),
			}),
			..Default::default()
		});
	}

	traces
}

fn build_layout() -> Layout {
	Layout {
		scene: Scene {
			xaxis: Axis {
				title: "Red",
				range: [0.0, 1.0],
			},
			yaxis: Axis {
				title: "Green",
				range: [0.0, 1.0],
			},
			zaxis: Axis {
				title: "Blue",
				range: [0.0, 1.0],
			},
		},
		margin: Margin {
			l: 0,
			r: 0,
			b: 0,
			t: 40,
		},
		height: 700,
	}
}

fn cluster_sections(samples: &[Sample], clustering: &Clustering, base: Option<&Path>) -> String {
	let groups = clustering.groups();
	let mut sections = String::new();

	for (id, members) in groups.iter().enumerate() {
		let centroid = clustering.centroids[id];
		sections.push_str(&format!(
			"<section class=\"cluster\">\n<h2 style=\"border-color: {}\">Cluster {} \
			 <span class=\"meta\">{} images</span> \
			 <span class=\"swatch\" style=\"background: {}\"></span> \
			 <span class=\"meta\">{}</span></h2>\n<div class=\"grid\">\n",
			palette::css(id),
			id,
			members.len(),
			centroid.hex(),
			centroid.hex(),
		));

		for &i in members {
			let label = esc(&samples[i].label);
			sections.push_str(&format!(
				"<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
				image_src(&samples[i].thumbnail, base),
				label,
				label,
			));
		}

		sections.push_str("</div>\n</section>\n");
	}

	sections
}

fn esc(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#39;")
}

fn image_src(thumbnail: &Path, base: Option<&Path>) -> String {
	match base {
		Some(base) => esc(&file_uri(&base.join(thumbnail))),
		None => esc(&thumbnail.to_string_lossy().replace('\\', "/")),
	}
}

fn file_uri(path: &Path) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
	let raw = absolute.to_string_lossy();
	let cleaned = raw.strip_prefix(r"\\?\").unwrap_or(&raw).replace('\\', "/");
	if cleaned.starts_with('/') {
		format!("file://{}", cleaned)
	} else {
		format!("file:///{}", cleaned)
	}
}
