//! Configuration module for Procurement-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use procurement_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Run deadline: {}s", config.engine.run_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, EngineConfig, GprConfig, HttpConfig, LoggingConfig, DEFAULT_GPR_BASE_URL,
    DEFAULT_GPR_DETAILS_URL, DEFAULT_GPR_SEARCH_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_or_default, load_config_with_hash};
pub use validation::validate;
