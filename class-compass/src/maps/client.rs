//! Distance-matrix HTTP client.
//!
//! Provides async methods for querying the distance-matrix provider, either
//! relaying its JSON untouched (for the proxy endpoint) or decoding it into
//! [`DistanceMatrixResponse`].

use std::time::Duration;

use tracing::debug;

use super::error::MapsError;
use super::types::DistanceMatrixResponse;

/// Default distance-matrix endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Configuration for the distance-matrix client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Endpoint URL (defaults to the production provider)
    pub base_url: String,
    /// Request timeout in seconds; `None` leaves reqwest's default (no timeout)
    pub timeout_secs: Option<u64>,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Distance-matrix API client.
#[derive(Debug, Clone)]
pub struct DistanceMatrixClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DistanceMatrixClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        if config.api_key.trim().is_empty() {
            return Err(MapsError::InvalidKey("must not be empty"));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch the distance matrix for one origin/destination pair as raw JSON.
    ///
    /// The mode token is passed through verbatim. Any non-2xx status or
    /// non-JSON body is an error; a 2xx JSON body is returned whatever its
    /// `status` field says.
    pub async fn fetch_raw(
        &self,
        origin: &str,
        destination: &str,
        mode: &str,
    ) -> Result<serde_json::Value, MapsError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("mode", mode),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(origin, destination, mode, body_len = body.len(), "distance matrix response");

        serde_json::from_str(&body).map_err(|e| MapsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Fetch and decode the distance matrix for one origin/destination pair.
    pub async fn fetch(
        &self,
        origin: &str,
        destination: &str,
        mode: &str,
    ) -> Result<DistanceMatrixResponse, MapsError> {
        let raw = self.fetch_raw(origin, destination, mode).await?;
        serde_json::from_value(raw).map_err(|e| MapsError::Json {
            message: e.to_string(),
            body: None,
        })
    }
}
