//! Three-channel color vectors used as clustering features

use serde::{Deserialize, Serialize};

/// An RGB color sample with channels normalized to [0, 1].
///
/// Serializes as a bare 3-element array, which is also the dataset
/// file format for the `rgb` field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f64; 3]);

impl Color {
	pub fn new(r: f64, g: f64, b: f64) -> Self {
		Self([r, g, b])
	}

	/// Create from 8-bit channels, normalizing to [0, 1]
	pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
		Self([f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0])
	}

	pub fn r(&self) -> f64 {
		self.0[0]
	}

	pub fn g(&self) -> f64 {
		self.0[1]
	}

	pub fn b(&self) -> f64 {
		self.0[2]
	}

	/// Euclidean distance to another color
	pub fn distance(&self, other: &Self) -> f64 {
		self.0
			.iter()
			.zip(other.0.iter())
			.map(|(a, b)| (a - b) * (a - b))
			.sum::<f64>()
			.sqrt()
	}

	/// Round every channel to `places` decimal places
	pub fn rounded(&self, places: u32) -> Self {
		let factor = 10f64.powi(places as i32);
		Self(self.0.map(|v| (v * factor).round() / factor))
	}

	/// Convert back to 8-bit channels for display
	pub fn to_rgb8(&self) -> [u8; 3] {
		self.0.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
	}

	/// Hex notation, e.g. `#1a2b3c`
	pub fn hex(&self) -> String {
		let [r, g, b] = self.to_rgb8();
		format!("#{:02x}{:02x}{:02x}", r, g, b)
	}
}

impl std::fmt::Display for Color {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distance_is_euclidean() {
		let a = Color::new(0.0, 0.0, 0.0);
		let b = Color::new(0.3, 0.4, 0.0);
		assert!((a.distance(&b) - 0.5).abs() < 1e-12);
		assert_eq!(a.distance(&a), 0.0);
	}

	#[test]
	fn rounding_matches_dataset_precision() {
		let c = Color::new(0.123456, 0.999999, 0.5);
		assert_eq!(c.rounded(4), Color::new(0.1235, 1.0, 0.5));
	}

	#[test]
	fn rgb8_roundtrip() {
		let c = Color::from_rgb8(255, 128, 0);
		assert_eq!(c.to_rgb8(), [255, 128, 0]);
		assert_eq!(c.hex(), "#ff8000");
	}
}
