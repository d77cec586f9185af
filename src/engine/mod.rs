//! Scraper engine
//!
//! This module runs every registered adapter in parallel and merges their
//! results:
//! - One task per adapter, isolated from its siblings' failures and panics
//! - Results flow back over a channel owned by the run
//! - Cancellation of the execution context ends the run promptly

mod coordinator;
mod report;

pub use coordinator::{Engine, DEFAULT_SHUTDOWN_GRACE};
pub use report::{AdapterReport, AdapterStatus, RunReport};
