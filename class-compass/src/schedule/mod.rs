//! The user's class schedule.
//!
//! [`ScheduleStore`] owns the ordered list of [`ClassEntry`] values for the
//! session. Every entry has a valid time range, no two entries share the
//! duplicate key (name, start time, location), and the list is always sorted
//! by start time with ties kept in insertion order.

mod entry;
mod error;
mod store;
mod time;

pub use entry::{ClassEntry, InvalidTransportMode, TransportMode};
pub use error::ScheduleError;
pub use store::{EntryId, ScheduleStore, ScheduledClass};
pub use time::{ClassTime, TimeError};
