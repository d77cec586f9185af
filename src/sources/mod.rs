//! Site adapters
//!
//! Each submodule implements the scraper contract for one external portal.
//! Adapters are independent: each builds its own HTTP session and shares
//! nothing with its siblings.

pub mod georgia;

use crate::config::Config;
use crate::engine::Engine;
use crate::scraper::ScrapeError;

/// Registers every adapter enabled in the configuration
///
/// # Returns
///
/// * `Ok(usize)` - Number of adapters registered
/// * `Err(ScrapeError)` - An adapter could not be constructed
pub fn register_enabled(engine: &mut Engine, config: &Config) -> Result<usize, ScrapeError> {
    let mut registered = 0;

    if config.georgia_gpr.enabled {
        engine.register(georgia::GprScraper::new(
            config.georgia_gpr.clone(),
            &config.http,
        )?);
        registered += 1;
    } else {
        tracing::info!(adapter = georgia::GprScraper::NAME, "Adapter disabled in config");
    }

    Ok(registered)
}
