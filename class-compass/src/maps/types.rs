//! Distance-matrix response DTOs.
//!
//! These types map directly to the provider's JSON. Everything is optional:
//! error responses omit `rows`, and elements omit `duration` when no route
//! was found.

use serde::{Deserialize, Serialize};

/// Top-level distance-matrix response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrixResponse {
    /// Request-level status, e.g. "OK" or "REQUEST_DENIED".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Explanation accompanying a non-OK status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Geocoded origin addresses, one per row.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origin_addresses: Vec<String>,

    /// Geocoded destination addresses, one per element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination_addresses: Vec<String>,

    /// One row per origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
}

/// Results for one origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// One element per destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
}

/// Result for one origin/destination pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Pair-level status, e.g. "OK" or "ZERO_RESULTS".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Travel time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,

    /// Travel distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,
}

/// A human-readable text paired with its numeric value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    /// Display text, e.g. "12 mins".
    pub text: String,

    /// Seconds for durations, metres for distances.
    #[serde(default)]
    pub value: Option<i64>,
}

impl DistanceMatrixResponse {
    /// The first element of the first row, if the response has one.
    pub fn first_element(&self) -> Option<&Element> {
        self.rows.as_ref()?.first()?.elements.as_ref()?.first()
    }
}
