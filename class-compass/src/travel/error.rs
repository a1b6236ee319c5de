//! Travel query error types.

use crate::maps::MapsError;

/// Reasons a single travel-time query produced no duration.
///
/// These never escape the resolver: each one is logged and shown as the
/// "unavailable" sentinel in its own row.
#[derive(Debug, thiserror::Error)]
pub enum TravelQueryError {
    /// HTTP request to the proxy failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Proxy answered with a non-success status
    #[error("distance proxy returned status {status}")]
    Status { status: u16 },

    /// Response body was not a distance matrix
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider call failed (in-process resolution)
    #[error("distance provider error: {0}")]
    Provider(#[from] MapsError),

    /// Configured proxy base URL cannot be parsed
    #[error("invalid proxy URL {url:?}: {message}")]
    InvalidProxyUrl { url: String, message: String },

    /// Response parsed, but has no first row or no first element
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),
}
