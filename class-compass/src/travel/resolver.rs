//! Per-segment travel-time resolution.

use std::fmt;

use futures::stream::{self, Stream, StreamExt};
use tracing::warn;

use crate::maps::DistanceMatrixResponse;
use crate::schedule::ClassEntry;

use super::error::TravelQueryError;
use super::source::TravelTimeSource;

/// Text shown when no travel time can be given for a row.
pub const UNAVAILABLE_TEXT: &str = "No travel time available";

/// Text shown when the provider found the pair but gave no duration.
pub const MISSING_TEXT: &str = "--";

/// Travel time into one class from the class before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelTime {
    /// First class of the day; nothing to travel from.
    NoPredecessor,
    /// Provider duration text, e.g. "12 mins".
    Duration(String),
    /// Provider answered, but without a duration for this pair.
    Missing,
    /// The query failed.
    Unavailable,
}

impl TravelTime {
    /// Whether the provider supplied a duration.
    pub fn is_known(&self) -> bool {
        matches!(self, TravelTime::Duration(_))
    }

    /// Text to display in the schedule.
    pub fn as_text(&self) -> &str {
        match self {
            TravelTime::Duration(text) => text,
            TravelTime::Missing => MISSING_TEXT,
            TravelTime::NoPredecessor | TravelTime::Unavailable => UNAVAILABLE_TEXT,
        }
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Pull the travel time out of a distance-matrix response.
///
/// Only the first element of the first row is considered. A response with
/// no such element is an [`TravelQueryError::UnexpectedShape`]; an element
/// without a duration is [`TravelTime::Missing`].
pub fn extract_travel_time(
    response: &DistanceMatrixResponse,
) -> Result<TravelTime, TravelQueryError> {
    let rows = response
        .rows
        .as_ref()
        .ok_or(TravelQueryError::UnexpectedShape("missing rows"))?;
    let row = rows
        .first()
        .ok_or(TravelQueryError::UnexpectedShape("no rows"))?;
    let element = row
        .elements
        .as_ref()
        .ok_or(TravelQueryError::UnexpectedShape("missing elements"))?
        .first()
        .ok_or(TravelQueryError::UnexpectedShape("no elements"))?;

    Ok(match &element.duration {
        Some(duration) => TravelTime::Duration(duration.text.clone()),
        None => TravelTime::Missing,
    })
}

/// Resolves travel times for a whole schedule.
///
/// By default one query is in flight at a time, so segment `i` finishes
/// before segment `i + 1` is requested. Raising `max_in_flight` overlaps
/// queries; results still come out in schedule order.
#[derive(Debug, Clone)]
pub struct TravelTimeResolver<S> {
    source: S,
    max_in_flight: usize,
}

impl<S: TravelTimeSource + Sync> TravelTimeResolver<S> {
    /// Create a sequential resolver over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_in_flight: 1,
        }
    }

    /// Allow up to `n` queries in flight at once (minimum 1).
    pub fn with_max_in_flight(mut self, n: usize) -> Self {
        self.max_in_flight = n.max(1);
        self
    }

    /// Maximum number of concurrent queries.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// The underlying query source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Lazily resolve one travel time per class, in schedule order.
    ///
    /// Yields exactly `classes.len()` items. Nothing is queried until the
    /// stream is polled, and every call starts from scratch. Dropping the
    /// stream stops any remaining queries from being issued.
    pub fn resolve<'a>(
        &'a self,
        classes: &'a [ClassEntry],
    ) -> impl Stream<Item = (usize, TravelTime)> + Send + 'a {
        stream::iter(0..classes.len())
            .map(move |index| self.resolve_segment(classes, index))
            .buffered(self.max_in_flight)
    }

    /// Resolve every segment and collect the travel times in order.
    pub async fn resolve_all(&self, classes: &[ClassEntry]) -> Vec<TravelTime> {
        self.resolve(classes)
            .map(|(_, travel_time)| travel_time)
            .collect()
            .await
    }

    async fn resolve_segment(&self, classes: &[ClassEntry], index: usize) -> (usize, TravelTime) {
        let Some(previous) = index.checked_sub(1).map(|i| &classes[i]) else {
            return (index, TravelTime::NoPredecessor);
        };
        let current = &classes[index];

        let result = self
            .source
            .distance_matrix(&previous.location, &current.location, current.transport_mode)
            .await
            .and_then(|response| extract_travel_time(&response));

        match result {
            Ok(travel_time) => (index, travel_time),
            Err(e) => {
                warn!(
                    index,
                    origin = %previous.location,
                    destination = %current.location,
                    mode = %current.transport_mode,
                    error = %e,
                    "travel time query failed"
                );
                (index, TravelTime::Unavailable)
            }
        }
    }
}
