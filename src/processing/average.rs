//! Average color extraction

use image::DynamicImage;

use crate::core::Color;

/// Mean RGB over every pixel, normalized to `[0, 1]` and rounded to four
/// decimal places (the precision the dataset file stores).
pub fn average_color(img: &DynamicImage) -> Color {
	let rgb = img.to_rgb8();
	let pixels = (rgb.width() as u64 * rgb.height() as u64).max(1);

	let mut sums = [0u64; 3];
	for pixel in rgb.pixels() {
		for (sum, &value) in sums.iter_mut().zip(pixel.0.iter()) {
			*sum += value as u64;
		}
	}

	Color(sums.map(|sum| sum as f64 / pixels as f64 / 255.0)).rounded(4)
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::{Rgb, RgbImage};

	fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
		let mut img = RgbImage::new(width, height);
		for pixel in img.pixels_mut() {
			*pixel = Rgb(rgb);
		}
		DynamicImage::ImageRgb8(img)
	}

	#[test]
	fn solid_image_averages_to_its_color() {
		let color = average_color(&solid(4, 4, [255, 0, 128]));
		assert_eq!(color, Color::new(1.0, 0.0, 0.502));
	}

	#[test]
	fn mean_spans_mixed_pixels() {
		let mut img = RgbImage::new(2, 1);
		img.put_pixel(0, 0, Rgb([0, 0, 0]));
		img.put_pixel(1, 0, Rgb([255, 255, 255]));
		let color = average_color(&DynamicImage::ImageRgb8(img));
		assert_eq!(color, Color::new(0.5, 0.5, 0.5));
	}
}
