//! CLI command implementations

pub mod classify;
pub mod completions;
pub mod config;
pub mod dims;
pub mod estimate;
