//! Station identifiers and station nodes.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A station identifier.
///
/// Identifiers are free-form strings from the network description, stored
/// trimmed. This type guarantees that any `StationId` is non-empty.
///
/// # Examples
///
/// ```
/// use transit_router::domain::StationId;
///
/// let id = StationId::parse("  CEN ").unwrap();
/// assert_eq!(id.as_str(), "CEN");
///
/// // Blank ids are rejected
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be blank",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidStationId {
                reason: "must not contain control characters",
            });
        }

        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role of a station in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    /// Ordinary stop.
    #[default]
    Normal,
    /// Interchange between several modes.
    Intermodal,
    /// Major hub.
    Principal,
}

impl StationKind {
    /// Lowercase name, as used in network files.
    pub fn as_str(&self) -> &'static str {
        match self {
            StationKind::Normal => "normal",
            StationKind::Intermodal => "intermodal",
            StationKind::Principal => "principal",
        }
    }
}

impl FromStr for StationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(StationKind::Normal),
            "intermodal" => Ok(StationKind::Intermodal),
            "principal" => Ok(StationKind::Principal),
            other => Err(format!("unknown station type '{other}'")),
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    /// Create a position, checking both coordinates are finite and in range.
    pub fn new(lon: f64, lat: f64) -> Result<Self, &'static str> {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err("longitude must be within [-180, 180]");
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err("latitude must be within [-90, 90]");
        }
        Ok(Self { lon, lat })
    }

    /// Great-circle distance to another position in kilometres (haversine).
    pub fn great_circle_km(&self, other: &Position) -> f64 {
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// A station in the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub position: Position,
    #[serde(rename = "type")]
    pub kind: StationKind,
    pub services: BTreeSet<String>,
}
