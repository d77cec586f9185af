//! HTTP fetcher implementation
//!
//! Every outbound request an adapter makes goes through these helpers so that
//! cancelling the run's token aborts in-flight work instead of letting it
//! finish after the deadline.

use crate::config::HttpConfig;
use crate::scraper::ScrapeError;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Builds a stateful HTTP client for one adapter
///
/// The client keeps a cookie store so a session cookie issued by a landing
/// page is sent back on later requests.
///
/// # Arguments
///
/// * `config` - Shared HTTP settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use procurement_scout::config::HttpConfig;
/// use procurement_scout::http::build_session_client;
///
/// let client = build_session_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_session_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .cookie_store(true)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a request, racing it against cancellation of `token`
///
/// Returns `ScrapeError::Cancelled` as soon as the token fires; the request
/// future is dropped, which aborts the connection.
pub async fn send_cancellable(
    token: &CancellationToken,
    request: RequestBuilder,
) -> Result<Response, ScrapeError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ScrapeError::Cancelled),
        result = request.send() => Ok(result?),
    }
}

/// Reads a response body as text, racing it against cancellation of `token`
pub async fn read_text_cancellable(
    token: &CancellationToken,
    response: Response,
) -> Result<String, ScrapeError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ScrapeError::Cancelled),
        result = response.text() => Ok(result?),
    }
}

/// Sleeps for `duration` unless `token` is cancelled first
pub async fn sleep_cancellable(
    token: &CancellationToken,
    duration: Duration,
) -> Result<(), ScrapeError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ScrapeError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
