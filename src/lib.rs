//! # Swatch Library
//!
//! Groups image collections by average color. Provides dataset preparation
//! (per-image average RGB + thumbnails), k-means clustering over the
//! resulting color vectors, and report generation.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod report;
pub mod storage;
pub mod ui;
