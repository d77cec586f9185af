use thiserror::Error;

/// Errors an adapter can report for a whole scrape or a single item
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to establish session with {url}: {source}")]
    Session { url: String, source: reqwest::Error },

    #[error("Search returned status {status}, body length {body_len}")]
    Search { status: u16, body_len: usize },

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Detail page {url} returned status {status}")]
    Detail { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ScrapeError {
    /// Returns true if the error came from the execution context being cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
