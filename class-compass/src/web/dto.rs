//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::schedule::{ClassEntry, ClassTime, ScheduledClass, TransportMode};
use crate::travel::TravelTime;

/// Query parameters for the distance proxy.
#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    /// Free-text origin location
    pub origin: String,

    /// Free-text destination location
    pub destination: String,

    /// Transport mode token, forwarded verbatim
    pub mode: String,
}

/// Why a submitted add-class form could not become a [`ClassEntry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),

    #[error("{0} must be a time like 09:30.")]
    InvalidTime(&'static str),

    #[error("Unknown transport mode {0:?}.")]
    InvalidMode(String),
}

/// The add-class form as submitted by the browser.
///
/// Field names match the form's input names. Every field defaults to empty
/// so that missing inputs produce an inline message rather than a bare
/// extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddClassForm {
    #[serde(rename = "class-name", default)]
    pub name: String,

    #[serde(rename = "start-time", default)]
    pub start_time: String,

    #[serde(rename = "end-time", default)]
    pub end_time: String,

    #[serde(default)]
    pub location: String,

    #[serde(rename = "professor-name", default)]
    pub professor: String,

    #[serde(rename = "transport-mode", default)]
    pub transport_mode: String,
}

impl AddClassForm {
    /// Convert the submitted strings into a class entry.
    ///
    /// Only shape is checked here; the time-order and duplicate rules belong
    /// to the schedule store.
    pub fn to_entry(&self) -> Result<ClassEntry, FormError> {
        let name = required("Class name", &self.name)?;
        let start = required("Start time", &self.start_time)?;
        let end = required("End time", &self.end_time)?;
        let location = required("Location", &self.location)?;

        let start_time =
            ClassTime::parse(start).map_err(|_| FormError::InvalidTime("Start time"))?;
        let end_time = ClassTime::parse(end).map_err(|_| FormError::InvalidTime("End time"))?;

        let transport_mode = TransportMode::parse(self.transport_mode.trim())
            .map_err(|_| FormError::InvalidMode(self.transport_mode.clone()))?;

        Ok(ClassEntry {
            name: name.to_string(),
            start_time,
            end_time,
            location: location.to_string(),
            professor: self.professor.trim().to_string(),
            transport_mode,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value)
    }
}

/// A class in the rendered schedule.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// Current position in the schedule (0-based)
    pub position: usize,

    /// Stable id for removal
    pub id: u64,

    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub professor: String,
    pub transport_mode: TransportMode,

    /// Travel time from the previous class, or a placeholder
    pub travel_time: String,

    /// Whether `travel_time` is a provider duration
    pub travel_time_known: bool,
}

impl ScheduleRow {
    /// Create from a scheduled class and its resolved travel time.
    pub fn new(position: usize, class: &ScheduledClass, travel_time: &TravelTime) -> Self {
        let entry = &class.entry;
        Self {
            position,
            id: class.id.get(),
            name: entry.name.clone(),
            start_time: entry.start_time.to_string(),
            end_time: entry.end_time.to_string(),
            location: entry.location.clone(),
            professor: entry.professor.clone(),
            transport_mode: entry.transport_mode,
            travel_time: travel_time.to_string(),
            travel_time_known: travel_time.is_known(),
        }
    }
}

/// Response carrying the whole re-rendered schedule.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    /// Store revision the rows were rendered from
    pub revision: u64,

    /// Classes in schedule order
    pub classes: Vec<ScheduleRow>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
