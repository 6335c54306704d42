//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Route, Station, TransportMode};
use crate::network::TransitGraph;
use crate::planner::{Algorithm, Criterion, RouteResult, SegmentDetail};

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station id or name
    pub origin: String,

    /// Destination station id or name
    pub destination: String,

    /// time, cost, distance or combined
    pub criterion: String,

    /// dijkstra or astar (defaults to the configured algorithm)
    pub algorithm: Option<String>,
}

/// A station as exposed over the API.
#[derive(Debug, Serialize)]
pub struct StationInfo {
    pub id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub services: Vec<String>,
}

impl StationInfo {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            lon: station.position.lon,
            lat: station.position.lat,
            kind: station.kind.to_string(),
            services: station.services.iter().cloned().collect(),
        }
    }
}

/// A route as exposed over the API.
#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub origin: String,
    pub destination: String,
    pub time: f64,
    pub cost: f64,
    pub distance: f64,
    pub mode: String,
    pub frequency: f64,
}

impl RouteInfo {
    pub fn from_route(route: &Route) -> Self {
        Self {
            origin: route.origin.to_string(),
            destination: route.destination.to_string(),
            time: route.time,
            cost: route.cost,
            distance: route.distance,
            mode: route.mode.to_string(),
            frequency: route.frequency,
        }
    }
}

/// Whole-network listing, for map clients.
#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    pub stations: Vec<StationInfo>,
    pub routes: Vec<RouteInfo>,
}

impl NetworkResponse {
    pub fn from_graph(graph: &TransitGraph) -> Self {
        Self {
            stations: graph.stations().iter().map(StationInfo::from_station).collect(),
            routes: graph.routes().iter().map(RouteInfo::from_route).collect(),
        }
    }
}

/// Totals over every segment, whatever the criterion.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub time: f64,
    pub cost: f64,
    pub distance: f64,
    pub mode_changes: usize,
    /// Modes in order of first use
    pub modes: Vec<TransportMode>,
}

/// Response for a planned route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Stations in travel order
    pub path: Vec<StationInfo>,

    /// Optimised total under `criterion`
    pub total: f64,

    /// Description of `total` with its unit
    pub label: String,

    pub criterion: Criterion,

    pub algorithm: Algorithm,

    pub segments: Vec<SegmentDetail>,

    pub summary: RouteSummary,

    /// Stations finalized by the search
    pub stations_settled: usize,
}

impl RouteResponse {
    /// Create from a planner result.
    pub fn from_result(result: &RouteResult, graph: &TransitGraph) -> Self {
        let path = result
            .path
            .iter()
            .filter_map(|id| graph.station(id.as_str()))
            .map(StationInfo::from_station)
            .collect();

        Self {
            path,
            total: result.total,
            label: result.label.to_string(),
            criterion: result.criterion,
            algorithm: result.algorithm,
            segments: result.segments.clone(),
            summary: RouteSummary {
                time: result.total_time(),
                cost: result.total_cost(),
                distance: result.total_distance(),
                mode_changes: result.mode_changes(),
                modes: result.modes(),
            },
            stations_settled: result.stations_settled,
        }
    }
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// invalid_input, no_path, unavailable or internal
    pub kind: &'static str,
}
