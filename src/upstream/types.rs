//! Upstream error definitions.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while calling the upstream API.
///
/// Every variant surfaces to callers the same way: a 500 envelope whose
/// `details` is this error's display text.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS, timeout or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream responded with status {status}")]
    Status { status: StatusCode },

    /// Upstream body is not valid JSON.
    #[error("invalid JSON from upstream: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Configured base URL could not be parsed.
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// Configured user agent is not a valid header value.
    #[error("invalid user agent header: {0}")]
    UserAgent(#[from] reqwest::header::InvalidHeaderValue),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
