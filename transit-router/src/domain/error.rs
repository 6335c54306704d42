//! Domain error types.
//!
//! These errors represent a malformed network description. They are fatal
//! to graph construction and distinct from query errors.

use super::StationId;

/// Which kind of input record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Station,
    Route,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Station => f.write_str("station"),
            RecordKind::Route => f.write_str("route"),
        }
    }
}

/// Validation failures while building the network graph.
///
/// `index` is the zero-based position of the offending record in its list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent
    #[error("{record} #{index}: missing required field '{field}'")]
    MissingField {
        record: RecordKind,
        index: usize,
        field: &'static str,
    },

    /// Station id could not be parsed
    #[error("{record} #{index}: {source}")]
    InvalidStationId {
        record: RecordKind,
        index: usize,
        source: super::InvalidStationId,
    },

    /// Two stations share an id
    #[error("station #{index}: duplicate station id {id}")]
    DuplicateStation { index: usize, id: StationId },

    /// A route endpoint does not name a known station
    #[error("route #{index}: unknown station {id}")]
    UnknownStation { index: usize, id: StationId },

    /// A field is present but out of range or unrecognised
    #[error("{record} #{index}: invalid '{field}': {reason}")]
    InvalidValue {
        record: RecordKind,
        index: usize,
        field: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::MissingField {
            record: RecordKind::Station,
            index: 2,
            field: "name",
        };
        assert_eq!(err.to_string(), "station #2: missing required field 'name'");

        let err = ValidationError::DuplicateStation {
            index: 3,
            id: StationId::parse("CEN").unwrap(),
        };
        assert_eq!(err.to_string(), "station #3: duplicate station id CEN");

        let err = ValidationError::UnknownStation {
            index: 0,
            id: StationId::parse("XXX").unwrap(),
        };
        assert_eq!(err.to_string(), "route #0: unknown station XXX");

        let err = ValidationError::InvalidValue {
            record: RecordKind::Route,
            index: 1,
            field: "time",
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "route #1: invalid 'time': must be positive");

        let source = StationId::parse("  ").unwrap_err();
        let err = ValidationError::InvalidStationId {
            record: RecordKind::Route,
            index: 4,
            source,
        };
        assert_eq!(err.to_string(), "route #4: invalid station id: must not be blank");
    }
}
