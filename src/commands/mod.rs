//! # Command Implementations
//!
//! Each submodule handles one CLI command (prep, cluster, clean).

pub mod clean;
pub mod cluster;
pub mod prep;
