//! Site adapter contract
//!
//! Every source the engine can run implements [`Scraper`]. This module also
//! holds the adapter error type and the per-run state machine adapters use
//! to track their progress.

mod error;
mod state;

pub use error::ScrapeError;
pub use state::{AdapterState, RunState};

use crate::model::Solicitation;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A site-specific scraper
///
/// Implementations must:
/// - stop outstanding network work promptly once `token` is cancelled
/// - never panic on malformed source data (skip or zero-fill and continue)
/// - report partial enrichment as `Ok` with best-effort records
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Stable identifier used in logs; must not change between runs
    fn name(&self) -> &str;

    /// Runs one full scrape against the source
    async fn scrape(&self, token: CancellationToken) -> Result<Vec<Solicitation>, ScrapeError>;
}
