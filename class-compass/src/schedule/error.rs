//! Schedule store error types.
//!
//! Each variant carries enough context for the web layer to explain the
//! rejection to the user. None of them leave the store partially mutated.

use super::store::EntryId;
use super::time::ClassTime;

/// Reasons the schedule store refuses a mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The class does not end after it starts.
    #[error("end time must be after start time (start {start}, end {end})")]
    InvalidTimeRange { start: ClassTime, end: ClassTime },

    /// A class with the same name, start time and location is already scheduled.
    #[error("{name} at {start_time} in {location} is already in the schedule")]
    Duplicate {
        name: String,
        start_time: ClassTime,
        location: String,
    },

    /// Positional removal past the end of the schedule.
    #[error("no class at position {index} (schedule has {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Removal of an id that is not (or no longer) scheduled.
    #[error("no class with id {0}")]
    UnknownEntry(EntryId),
}

impl ScheduleError {
    /// The inline message shown next to the add-class form.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScheduleError::InvalidTimeRange { .. } => "End time must be after start time.",
            ScheduleError::Duplicate { .. } => "This class is already added to your schedule.",
            ScheduleError::IndexOutOfBounds { .. } | ScheduleError::UnknownEntry(_) => {
                "That class is no longer in your schedule."
            }
        }
    }
}
