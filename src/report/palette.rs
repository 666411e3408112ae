//! Cluster display colors

const PALETTE: [(u8, u8, u8); 8] = [
	(255, 0, 0),
	(0, 255, 0),
	(0, 0, 255),
	(255, 165, 0),
	(128, 0, 128),
	(0, 255, 255),
	(255, 0, 255),
	(128, 128, 0),
];

/// Display color for a cluster index; cycles once the palette runs out.
///
/// Display colors identify clusters in plots and terminal output. They are
/// unrelated to centroid colors, which come from the data itself.
pub fn display_color(cluster: usize) -> (u8, u8, u8) {
	PALETTE[cluster % PALETTE.len()]
}

/// CSS `rgb(...)` string for a cluster index
pub fn css(cluster: usize) -> String {
	let (r, g, b) = display_color(cluster);
	format!("rgb({}, {}, {})", r, g, b)
}
