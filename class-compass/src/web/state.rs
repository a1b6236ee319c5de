//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::maps::{DistanceMatrixClient, MapsError};
use crate::schedule::{ClassEntry, ScheduleStore, ScheduledClass};
use crate::travel::{
    ProxyClient, TravelBackend, TravelQueryError, TravelTime, TravelTimeResolver,
};

/// Errors building the application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to create distance-matrix client: {0}")]
    Maps(#[from] MapsError),

    #[error("failed to create distance proxy client: {0}")]
    Proxy(#[from] TravelQueryError),
}

/// Shared application state.
///
/// Holds the session's schedule and the clients needed to resolve and proxy
/// distance queries.
#[derive(Clone)]
pub struct AppState {
    /// The schedule, created empty at startup
    pub schedule: Arc<RwLock<ScheduleStore>>,

    /// Distance-matrix client backing the `/distance` proxy
    pub maps: Arc<DistanceMatrixClient>,

    /// Resolver used when rendering the schedule
    pub resolver: Arc<TravelTimeResolver<TravelBackend>>,
}

impl AppState {
    /// Create a new app state with an empty schedule.
    pub fn new(maps: DistanceMatrixClient, resolver: TravelTimeResolver<TravelBackend>) -> Self {
        Self {
            schedule: Arc::new(RwLock::new(ScheduleStore::new())),
            maps: Arc::new(maps),
            resolver: Arc::new(resolver),
        }
    }

    /// Build the state described by `config`.
    ///
    /// Travel times are resolved in-process unless a remote proxy URL is
    /// configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, StateError> {
        let maps = DistanceMatrixClient::new(config.maps.clone())?;

        let backend = match &config.proxy_url {
            Some(url) => TravelBackend::Proxy(ProxyClient::new(url)?),
            None => TravelBackend::Direct(maps.clone()),
        };
        let resolver = TravelTimeResolver::new(backend).with_max_in_flight(config.max_in_flight);

        Ok(Self::new(maps, resolver))
    }

    /// Snapshot the schedule and resolve its travel times.
    ///
    /// The store lock is released before any query is issued. Returns the
    /// revision the snapshot was taken at.
    pub async fn render_schedule(&self) -> (u64, Vec<(ScheduledClass, TravelTime)>) {
        let (revision, classes) = {
            let store = self.schedule.read().await;
            (store.revision(), store.snapshot())
        };

        let entries: Vec<ClassEntry> = classes.iter().map(|c| c.entry.clone()).collect();
        let travel_times = self.resolver.resolve_all(&entries).await;

        (revision, classes.into_iter().zip(travel_times).collect())
    }
}
