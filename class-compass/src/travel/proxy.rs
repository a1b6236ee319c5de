//! Client for a remote distance proxy's `/distance` endpoint.

use reqwest::Url;

use crate::maps::DistanceMatrixResponse;
use crate::schedule::TransportMode;

use super::error::TravelQueryError;
use super::source::TravelTimeSource;

/// Queries a running Class Compass server's distance proxy.
///
/// The proxy answers failures with a 500 and a generic error body; that is
/// treated exactly like any other unusable response.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ProxyClient {
    /// Create a client for the proxy at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self, TravelQueryError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join("distance"))
            .map_err(|e| TravelQueryError::InvalidProxyUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    /// The `/distance` URL queries are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl TravelTimeSource for ProxyClient {
    async fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
        mode: TransportMode,
    ) -> Result<DistanceMatrixResponse, TravelQueryError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", mode.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TravelQueryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TravelQueryError::Json {
            message: e.to_string(),
        })
    }
}
