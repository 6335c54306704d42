//! Routes: the undirected edges between stations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::StationId;

/// Default service frequency in minutes when a route does not state one.
pub const DEFAULT_FREQUENCY_MINS: f64 = 15.0;

/// Transport mode operating a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Bus,
    Metro,
    Train,
    Other,
}

impl TransportMode {
    /// Lowercase name, as used in network files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Metro => "metro",
            TransportMode::Train => "train",
            TransportMode::Other => "other",
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    /// Accepts the English names plus the Spanish ones found in older
    /// network files (`autobus`, `tren`, `otro`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bus" | "autobus" | "autobús" => Ok(TransportMode::Bus),
            "metro" => Ok(TransportMode::Metro),
            "train" | "tren" => Ok(TransportMode::Train),
            "other" | "otro" => Ok(TransportMode::Other),
            other => Err(format!("unknown transport mode '{other}'")),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An undirected route between two stations.
///
/// `origin` and `destination` only record the orientation of the input
/// record; the route can be travelled both ways.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub origin: StationId,
    pub destination: StationId,
    /// Travel time in minutes (> 0).
    pub time: f64,
    /// Fare in currency units (>= 0).
    pub cost: f64,
    /// Length in kilometres (>= 0).
    pub distance: f64,
    pub mode: TransportMode,
    /// Minutes between consecutive services (> 0).
    pub frequency: f64,
}
