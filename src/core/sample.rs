//! Dataset records produced by `prep` and consumed by `cluster`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// One labeled color sample.
///
/// The clustering engine only ever sees the `rgb` vector; label and
/// thumbnail ride along untouched for presentation, correlated back to
/// the engine output by dataset index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
	/// Display name, derived from the source filename
	pub label: String,
	/// Average color of the source image, channels in [0, 1]
	pub rgb: Color,
	/// Thumbnail path, relative to the collection directory
	pub thumbnail: PathBuf,
}

impl Sample {
	pub fn new(label: impl Into<String>, rgb: Color, thumbnail: impl Into<PathBuf>) -> Self {
		Self {
			label: label.into(),
			rgb,
			thumbnail: thumbnail.into(),
		}
	}
}
