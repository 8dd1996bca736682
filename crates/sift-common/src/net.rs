//! HTTP fetch utilities.
//!
//! Provides the blocking HTTP GET wrapper used to obtain markup from a URL
//! before it is handed to the tree builder. Failures are reported as a
//! [`FetchError`], distinct from local I/O failures, and the tree builder is
//! never invoked on a failed fetch.

use std::time::Duration;

use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
pub const TIMEOUT: Duration = Duration::from_secs(30);

/// Why a markup fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(u16),
    /// The response body could not be read as text.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Returns true if `source` looks like an `http://` or `https://` URL.
#[must_use]
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the HTTP client cannot be created, the request
/// fails, the response has a non-success status, or the body cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    response.text().map_err(FetchError::Body)
}
