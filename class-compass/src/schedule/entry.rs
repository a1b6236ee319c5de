//! Class entries and transport modes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::time::ClassTime;

/// Error returned when parsing an unknown transport mode token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transport mode: {token:?}")]
pub struct InvalidTransportMode {
    token: String,
}

/// How the user travels to a class from the previous one.
///
/// The lower-case token is what the distance-matrix provider expects in its
/// `mode` parameter.
///
/// # Examples
///
/// ```
/// use class_compass::schedule::TransportMode;
///
/// let mode = TransportMode::parse("bicycling").unwrap();
/// assert_eq!(mode.as_str(), "bicycling");
///
/// assert!(TransportMode::parse("teleport").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TransportMode {
    /// All modes, in the order the add-class form lists them.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Driving,
        TransportMode::Walking,
        TransportMode::Bicycling,
        TransportMode::Transit,
    ];

    /// Parse a mode from its provider token.
    pub fn parse(s: &str) -> Result<Self, InvalidTransportMode> {
        match s {
            "driving" => Ok(TransportMode::Driving),
            "walking" => Ok(TransportMode::Walking),
            "bicycling" => Ok(TransportMode::Bicycling),
            "transit" => Ok(TransportMode::Transit),
            other => Err(InvalidTransportMode {
                token: other.to_string(),
            }),
        }
    }

    /// Returns the provider token.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Bicycling => "bicycling",
            TransportMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransportMode {
    type Err = InvalidTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A class in the user's schedule.
///
/// Entries are immutable once scheduled: the store only ever inserts or
/// removes whole entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub name: String,
    pub start_time: ClassTime,
    pub end_time: ClassTime,
    pub location: String,
    pub professor: String,
    pub transport_mode: TransportMode,
}

impl ClassEntry {
    /// Whether the class ends strictly after it starts.
    pub fn has_valid_time_range(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Whether two entries collide on the duplicate key
    /// (name, start time, location).
    pub fn is_duplicate_of(&self, other: &ClassEntry) -> bool {
        self.name == other.name
            && self.start_time == other.start_time
            && self.location == other.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, start: &str, end: &str, location: &str) -> ClassEntry {
        ClassEntry {
            name: name.to_string(),
            start_time: ClassTime::parse(start).unwrap(),
            end_time: ClassTime::parse(end).unwrap(),
            location: location.to_string(),
            professor: "Dr. Lee".to_string(),
            transport_mode: TransportMode::Walking,
        }
    }

    #[test]
    fn parse_all_modes() {
        for mode in TransportMode::ALL {
            assert_eq!(TransportMode::parse(mode.as_str()).unwrap(), mode);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(TransportMode::parse("Driving").is_err());
        assert!(TransportMode::parse("").is_err());
    }

    #[test]
    fn invalid_mode_display() {
        let err = TransportMode::parse("hover").unwrap_err();
        assert_eq!(err.to_string(), "invalid transport mode: \"hover\"");
    }

    #[test]
    fn time_range_validity() {
        assert!(entry("Math", "09:00", "10:00", "A").has_valid_time_range());
        assert!(!entry("Math", "10:00", "10:00", "A").has_valid_time_range());
        assert!(!entry("Math", "10:00", "09:00", "A").has_valid_time_range());
    }

    #[test]
    fn duplicate_key_ignores_other_fields() {
        let a = entry("Math", "09:00", "10:00", "Building A");
        let mut b = entry("Math", "09:00", "11:00", "Building A");
        b.professor = "Dr. Kim".to_string();
        b.transport_mode = TransportMode::Transit;
        assert!(a.is_duplicate_of(&b));

        let c = entry("Math", "09:00", "10:00", "Building B");
        assert!(!a.is_duplicate_of(&c));

        let d = entry("Math", "09:30", "10:00", "Building A");
        assert!(!a.is_duplicate_of(&d));
    }

    #[test]
    fn json_uses_camel_case() {
        let e = entry("Math", "09:00", "10:00", "Building A");
        let json = serde_json::to_value(&e).unwrap();

        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:00");
        assert_eq!(json["transportMode"], "walking");

        let back: ClassEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }
}
