//! Distance-matrix client error types.

/// Errors from the distance-matrix HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not JSON. `body` holds the first 500 characters.
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API key cannot be sent in a request
    #[error("invalid API key: {0}")]
    InvalidKey(&'static str),
}
