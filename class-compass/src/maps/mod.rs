//! Distance-matrix provider client.
//!
//! The provider answers "how long does it take to get from A to B by this
//! mode of transport". We only ever ask for a single origin and a single
//! destination, so a useful response has one row with one element.
//!
//! Key characteristics of the provider:
//! - Authentication is a `key` query parameter, not a header
//! - Request-level failures (bad key, quota) still come back as HTTP 200 with
//!   a non-`OK` `status` field and usually no rows
//! - Per-pair failures (unknown address, no route) are reported in the
//!   element's `status`, with `duration` omitted

mod client;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, DistanceMatrixClient, MapsConfig};
pub use error::MapsError;
pub use types::{DistanceMatrixResponse, Element, Row, TextValue};
