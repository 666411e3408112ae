//! Core domain types and the clustering engine

pub mod color;
pub mod kmeans;
pub mod sample;

pub use color::Color;
pub use kmeans::{cluster, nearest, Clustering};
pub use sample::Sample;
