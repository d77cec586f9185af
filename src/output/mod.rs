//! Output module for run summaries and the aggregate hand-off
//!
//! This module handles:
//! - Computing and printing per-run statistics
//! - Exporting the aggregate records as JSON for an external persistence step

mod json;
pub mod stats;

pub use json::{to_json, write_json};
pub use stats::{print_statistics, RunStatistics};
