//! In-memory schedule store.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::entry::ClassEntry;
use super::error::ScheduleError;

/// Stable identifier for a scheduled class.
///
/// Ids are assigned on insertion and never reused by the same store, so a
/// removal addressed by id still hits the intended class after the list has
/// been re-sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw id (as received back from a rendered removal control).
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A class together with its stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledClass {
    pub id: EntryId,
    #[serde(flatten)]
    pub entry: ClassEntry,
}

/// Ordered, validated collection of classes for one session.
///
/// Starts empty and lives as long as the process. Mutation is synchronous;
/// callers that share a store across tasks wrap it in a lock.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    classes: Vec<ScheduledClass>,
    next_id: u64,
    revision: u64,
}

impl ScheduleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, keeping the schedule sorted by start time.
    ///
    /// Rejects classes that do not end after they start, then classes that
    /// collide with an existing entry on (name, start time, location). On
    /// rejection the store is unchanged.
    pub fn add(&mut self, entry: ClassEntry) -> Result<EntryId, ScheduleError> {
        if !entry.has_valid_time_range() {
            return Err(ScheduleError::InvalidTimeRange {
                start: entry.start_time,
                end: entry.end_time,
            });
        }

        if self.classes.iter().any(|c| c.entry.is_duplicate_of(&entry)) {
            return Err(ScheduleError::Duplicate {
                name: entry.name,
                start_time: entry.start_time,
                location: entry.location,
            });
        }

        let id = EntryId(self.next_id);
        self.next_id += 1;

        debug!(%id, name = %entry.name, start = %entry.start_time, "scheduling class");
        self.classes.push(ScheduledClass { id, entry });
        // Vec::sort_by_key is stable, so equal start times keep insertion order.
        self.classes.sort_by_key(|c| c.entry.start_time);
        self.revision += 1;

        Ok(id)
    }

    /// Remove the class at `index`.
    ///
    /// Later classes shift down by one; nothing else moves.
    pub fn remove(&mut self, index: usize) -> Result<ClassEntry, ScheduleError> {
        if index >= self.classes.len() {
            return Err(ScheduleError::IndexOutOfBounds {
                index,
                len: self.classes.len(),
            });
        }

        let removed = self.classes.remove(index);
        debug!(id = %removed.id, index, "removed class");
        self.revision += 1;
        Ok(removed.entry)
    }

    /// Remove the class with the given id.
    pub fn remove_by_id(&mut self, id: EntryId) -> Result<ClassEntry, ScheduleError> {
        let index = self
            .position(id)
            .ok_or(ScheduleError::UnknownEntry(id))?;
        self.remove(index)
    }

    /// Current position of a class, if it is scheduled.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.classes.iter().position(|c| c.id == id)
    }

    /// Ordered snapshot of the schedule.
    pub fn list(&self) -> Vec<ClassEntry> {
        self.classes.iter().map(|c| c.entry.clone()).collect()
    }

    /// Ordered snapshot including ids.
    pub fn snapshot(&self) -> Vec<ScheduledClass> {
        self.classes.clone()
    }

    /// Number of scheduled classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Counter bumped by every successful add or remove.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
