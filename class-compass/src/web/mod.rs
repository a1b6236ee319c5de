//! Web layer for Class Compass.
//!
//! Serves the schedule page, a JSON API over the schedule store, the
//! `/distance` proxy and the static assets under the public root.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, DISTANCE_FAILURE_MESSAGE, create_router};
pub use state::{AppState, StateError};
pub use templates::*;
