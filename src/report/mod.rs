//! Cluster presentation: display palette and HTML report

pub mod html;
pub mod palette;

pub use palette::{css, display_color};
