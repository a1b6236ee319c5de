//! Askama templates for the web frontend.

use askama::Template;

use crate::schedule::{ScheduledClass, TransportMode};
use crate::travel::TravelTime;

use super::dto::AddClassForm;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Schedule page: the table plus the add-class form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub rows: Vec<ScheduleRowView>,
    pub form: FormView,
    /// Inline error shown above the form
    pub message: Option<String>,
}

// ============================================================================
// Fragment Templates (no base.html)
// ============================================================================

/// Schedule table fragment.
#[derive(Template)]
#[template(path = "schedule_table.html")]
pub struct ScheduleTableTemplate {
    pub rows: Vec<ScheduleRowView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One row of the schedule table.
#[derive(Debug, Clone)]
pub struct ScheduleRowView {
    pub position: usize,
    pub id: u64,
    pub name: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub professor: String,
    pub transport_mode: &'static str,
    pub travel_time: String,
    pub travel_time_known: bool,
    /// CSS classes for the travel-time cell
    pub travel_time_class: &'static str,
}

impl ScheduleRowView {
    /// Create from a scheduled class and its resolved travel time.
    pub fn new(position: usize, class: &ScheduledClass, travel_time: &TravelTime) -> Self {
        let entry = &class.entry;
        Self {
            position,
            id: class.id.get(),
            name: entry.name.clone(),
            start: entry.start_time.to_string(),
            end: entry.end_time.to_string(),
            location: entry.location.clone(),
            professor: entry.professor.clone(),
            transport_mode: entry.transport_mode.as_str(),
            travel_time: travel_time.to_string(),
            travel_time_known: travel_time.is_known(),
            travel_time_class: match travel_time {
                TravelTime::Duration(_) => "travel-time",
                TravelTime::Missing => "travel-time no-route",
                TravelTime::NoPredecessor | TravelTime::Unavailable => "travel-time unavailable",
            },
        }
    }
}

/// Values to pre-fill the add-class form with.
#[derive(Debug, Clone)]
pub struct FormView {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub professor: String,
    pub modes: Vec<ModeOption>,
}

/// A transport-mode `<option>`.
#[derive(Debug, Clone)]
pub struct ModeOption {
    pub value: &'static str,
    pub selected: bool,
}

impl FormView {
    /// An empty form with the first mode selected.
    pub fn empty() -> Self {
        Self::from_form(&AddClassForm::default())
    }

    /// Re-populate the form with what the user submitted.
    pub fn from_form(form: &AddClassForm) -> Self {
        let chosen = TransportMode::parse(form.transport_mode.trim()).ok();
        let modes = TransportMode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| ModeOption {
                value: mode.as_str(),
                selected: chosen.map_or(i == 0, |c| c == *mode),
            })
            .collect();

        Self {
            name: form.name.clone(),
            start_time: form.start_time.clone(),
            end_time: form.end_time.clone(),
            location: form.location.clone(),
            professor: form.professor.clone(),
            modes,
        }
    }
}
