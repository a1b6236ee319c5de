//! Where travel-time queries are sent.

use std::future::Future;

use crate::maps::{DistanceMatrixClient, DistanceMatrixResponse};
use crate::schedule::TransportMode;

use super::error::TravelQueryError;
use super::proxy::ProxyClient;

/// Answers distance-matrix queries for one origin/destination pair.
pub trait TravelTimeSource {
    /// Fetch the distance matrix from `origin` to `destination` by `mode`.
    fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
        mode: TransportMode,
    ) -> impl Future<Output = Result<DistanceMatrixResponse, TravelQueryError>> + Send;
}

impl TravelTimeSource for DistanceMatrixClient {
    async fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
        mode: TransportMode,
    ) -> Result<DistanceMatrixResponse, TravelQueryError> {
        Ok(self.fetch(origin, destination, mode.as_str()).await?)
    }
}

/// The source the server resolves travel times with.
///
/// Normally the provider is called in-process. When a remote distance proxy
/// is configured, queries go through its `/distance` endpoint instead.
#[derive(Debug, Clone)]
pub enum TravelBackend {
    Direct(DistanceMatrixClient),
    Proxy(ProxyClient),
}

impl TravelTimeSource for TravelBackend {
    async fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
        mode: TransportMode,
    ) -> Result<DistanceMatrixResponse, TravelQueryError> {
        match self {
            TravelBackend::Direct(client) => client.distance_matrix(origin, destination, mode).await,
            TravelBackend::Proxy(client) => client.distance_matrix(origin, destination, mode).await,
        }
    }
}
