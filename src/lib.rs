//! Procurement-Scout: a concurrent scraper for government procurement postings
//!
//! This crate runs independently implemented site adapters in parallel and
//! normalizes what they find into a common [`Solicitation`] record, ready to
//! be handed to an external persistence layer.

pub mod config;
pub mod engine;
pub mod http;
pub mod model;
pub mod output;
pub mod scraper;
pub mod sources;

use thiserror::Error;

/// Main error type for Procurement-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] scraper::ScrapeError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

// Re-export commonly used types
pub use config::Config;
pub use engine::{AdapterReport, AdapterStatus, Engine, RunReport};
pub use model::{Document, Solicitation};
pub use scraper::{AdapterState, ScrapeError, Scraper};
