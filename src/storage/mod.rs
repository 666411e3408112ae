//! Dataset persistence

pub mod dataset;

pub use dataset::{load, save};
