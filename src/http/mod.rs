//! HTTP plumbing shared by site adapters
//!
//! This module contains:
//! - Session client construction (cookie retention, user agent, timeouts)
//! - Request helpers that abort as soon as the execution context is cancelled

mod fetcher;

pub use fetcher::{
    build_session_client, read_text_cancellable, send_cancellable, sleep_cancellable,
};
