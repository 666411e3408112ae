//! Image file processing

pub mod average;
pub mod scan;
pub mod thumbnail;

pub use scan::{scan_directory, ScanResult};
