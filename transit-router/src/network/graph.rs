//! The transit graph: stations, routes and adjacency.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::domain::{
    DEFAULT_FREQUENCY_MINS, Position, RecordKind, Route, Station, StationId, StationKind,
    TransportMode, ValidationError,
};

use super::error::LoadError;
use super::records::{NetworkDescription, RouteRecord, StationRecord};

/// Index of a station within the graph's station arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationIdx(pub usize);

/// Index of a route within the graph's route arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub usize);

/// An undirected, immutable transit network.
///
/// Stations and routes are kept in input order; indices into both arenas are
/// stable for the lifetime of the graph. Parallel routes between the same
/// pair of stations are kept as separate edges.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    stations: Vec<Station>,
    routes: Vec<Route>,
    index: HashMap<StationId, StationIdx>,
    /// For each station, the `(neighbour, edge)` pairs in route input order.
    adjacency: Vec<Vec<(StationIdx, EdgeIdx)>>,
}

impl TransitGraph {
    /// Build a graph from raw station and route records.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the first record that is missing a
    /// required field, has an out-of-range value, duplicates a station id, or
    /// references a station that does not exist.
    pub fn build(
        stations: Vec<StationRecord>,
        routes: Vec<RouteRecord>,
    ) -> Result<Self, ValidationError> {
        let mut built: Vec<Station> = Vec::with_capacity(stations.len());
        let mut index: HashMap<StationId, StationIdx> = HashMap::with_capacity(stations.len());

        for (i, record) in stations.into_iter().enumerate() {
            let station = station_from_record(i, record)?;
            if index.contains_key(&station.id) {
                return Err(ValidationError::DuplicateStation {
                    index: i,
                    id: station.id,
                });
            }
            index.insert(station.id.clone(), StationIdx(built.len()));
            built.push(station);
        }

        let mut adjacency = vec![Vec::new(); built.len()];
        let mut edges: Vec<Route> = Vec::with_capacity(routes.len());

        for (i, record) in routes.into_iter().enumerate() {
            let route = route_from_record(i, record)?;
            let a = endpoint(&index, i, &route.origin)?;
            let b = endpoint(&index, i, &route.destination)?;

            let edge = EdgeIdx(edges.len());
            adjacency[a.0].push((b, edge));
            // A self-loop is listed once
            if a != b {
                adjacency[b.0].push((a, edge));
            }
            edges.push(route);
        }

        info!(
            stations = built.len(),
            routes = edges.len(),
            "built transit graph"
        );

        Ok(Self {
            stations: built,
            routes: edges,
            index,
            adjacency,
        })
    }

    /// Build a graph from a parsed network description.
    pub fn from_description(description: NetworkDescription) -> Result<Self, ValidationError> {
        Self::build(description.stations, description.routes)
    }

    /// Load and build a graph from a JSON network file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        info!("Loading network description from {}", path.display());
        let description = NetworkDescription::from_path(path)?;
        Ok(Self::from_description(description)?)
    }

    /// Whether a station with this id exists.
    pub fn has_station(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a station by exact id.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index_of(id).map(|idx| self.station_at(idx))
    }

    /// Neighbours of a station with the connecting route, in input order.
    ///
    /// Returns `None` if the station does not exist. A station with parallel
    /// routes to the same neighbour yields that neighbour once per route.
    pub fn neighbors(&self, id: &str) -> Option<Vec<(&StationId, &Route)>> {
        let idx = self.index_of(id)?;
        Some(
            self.adjacency[idx.0]
                .iter()
                .map(|&(next, edge)| (&self.stations[next.0].id, &self.routes[edge.0]))
                .collect(),
        )
    }

    /// Resolve user-entered station text.
    ///
    /// Tries, in order: exact id, case-insensitive id, case-insensitive name.
    /// Surrounding whitespace is ignored.
    pub fn find_station(&self, query: &str) -> Option<&Station> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(station) = self.station(query) {
            return Some(station);
        }

        let lowered = query.to_lowercase();
        self.stations
            .iter()
            .find(|s| s.id.as_str().to_lowercase() == lowered)
            .or_else(|| {
                self.stations
                    .iter()
                    .find(|s| s.name.to_lowercase() == lowered)
            })
    }

    /// Arena index of a station id.
    pub fn index_of(&self, id: &str) -> Option<StationIdx> {
        self.index.get(id).copied()
    }

    /// Station at an arena index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` did not come from this graph.
    pub fn station_at(&self, idx: StationIdx) -> &Station {
        &self.stations[idx.0]
    }

    /// Route at an arena index.
    ///
    /// # Panics
    ///
    /// Panics if `edge` did not come from this graph.
    pub fn route_at(&self, edge: EdgeIdx) -> &Route {
        &self.routes[edge.0]
    }

    /// `(neighbour, edge)` pairs of a station.
    pub fn adjacent(&self, idx: StationIdx) -> &[(StationIdx, EdgeIdx)] {
        &self.adjacency[idx.0]
    }

    /// Edges joining two stations, in input order.
    pub fn edges_between(
        &self,
        a: StationIdx,
        b: StationIdx,
    ) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.adjacency[a.0]
            .iter()
            .filter(move |&&(next, _)| next == b)
            .map(|&(_, edge)| edge)
    }

    /// All stations in input order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// All routes in input order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

fn required<T>(
    value: Option<T>,
    record: RecordKind,
    index: usize,
    field: &'static str,
) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField {
        record,
        index,
        field,
    })
}

fn parse_id(raw: &str, record: RecordKind, index: usize) -> Result<StationId, ValidationError> {
    StationId::parse(raw).map_err(|source| ValidationError::InvalidStationId {
        record,
        index,
        source,
    })
}

/// Upper bound on any route quantity. Keeps path sums far from overflow.
pub const MAX_ROUTE_QUANTITY: f64 = 1e9;

/// Check a route quantity is at most [`MAX_ROUTE_QUANTITY`] and either
/// positive or non-negative.
fn check_quantity(
    value: f64,
    index: usize,
    field: &'static str,
    allow_zero: bool,
) -> Result<f64, ValidationError> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if lower_ok && value <= MAX_ROUTE_QUANTITY {
        Ok(value)
    } else {
        let expected = if allow_zero { "non-negative" } else { "positive" };
        Err(ValidationError::InvalidValue {
            record: RecordKind::Route,
            index,
            field,
            reason: format!(
                "must be a {expected} number no greater than {MAX_ROUTE_QUANTITY}, got {value}"
            ),
        })
    }
}

fn station_from_record(index: usize, record: StationRecord) -> Result<Station, ValidationError> {
    let kind_of = RecordKind::Station;

    let raw_id = required(record.id, kind_of, index, "id")?;
    let id = parse_id(&raw_id, kind_of, index)?;

    let name = required(record.name, kind_of, index, "name")?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidValue {
            record: kind_of,
            index,
            field: "name",
            reason: "must not be blank".to_string(),
        });
    }

    let lon = required(record.lon, kind_of, index, "lon")?;
    let lat = required(record.lat, kind_of, index, "lat")?;
    let position = Position::new(lon, lat).map_err(|reason| ValidationError::InvalidValue {
        record: kind_of,
        index,
        field: "position",
        reason: reason.to_string(),
    })?;

    let kind = match record.kind {
        Some(raw) => raw
            .parse::<StationKind>()
            .map_err(|reason| ValidationError::InvalidValue {
                record: kind_of,
                index,
                field: "type",
                reason,
            })?,
        None => StationKind::default(),
    };

    let services = record
        .services
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(Station {
        id,
        name: name.to_string(),
        position,
        kind,
        services,
    })
}

fn route_from_record(index: usize, record: RouteRecord) -> Result<Route, ValidationError> {
    let kind_of = RecordKind::Route;

    let origin = required(record.origin, kind_of, index, "origin")?;
    let origin = parse_id(&origin, kind_of, index)?;
    let destination = required(record.destination, kind_of, index, "destination")?;
    let destination = parse_id(&destination, kind_of, index)?;

    let time = check_quantity(required(record.time, kind_of, index, "time")?, index, "time", false)?;
    let cost = check_quantity(required(record.cost, kind_of, index, "cost")?, index, "cost", true)?;
    let distance = check_quantity(record.distance.unwrap_or(0.0), index, "distance", true)?;
    let frequency = check_quantity(
        record.frequency.unwrap_or(DEFAULT_FREQUENCY_MINS),
        index,
        "frequency",
        false,
    )?;

    let mode = match record.mode {
        Some(raw) => raw
            .parse::<TransportMode>()
            .map_err(|reason| ValidationError::InvalidValue {
                record: kind_of,
                index,
                field: "mode",
                reason,
            })?,
        None => TransportMode::default(),
    };

    Ok(Route {
        origin,
        destination,
        time,
        cost,
        distance,
        mode,
        frequency,
    })
}

fn endpoint(
    index: &HashMap<StationId, StationIdx>,
    route_index: usize,
    id: &StationId,
) -> Result<StationIdx, ValidationError> {
    index
        .get(id)
        .copied()
        .ok_or_else(|| ValidationError::UnknownStation {
            index: route_index,
            id: id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_stations() -> Vec<StationRecord> {
        vec![
            StationRecord::new("A", "Alpha", 0.0, 0.0),
            StationRecord::new("B", "Beta", 0.0, 1.0),
            StationRecord::new("C", "Gamma", 1.0, 1.0),
        ]
    }

    fn abc_routes() -> Vec<RouteRecord> {
        vec![
            RouteRecord::new("A", "B", 5.0, 2.0),
            RouteRecord::new("B", "C", 3.0, 4.0),
            RouteRecord::new("A", "C", 10.0, 1.0),
        ]
    }

    fn abc() -> TransitGraph {
        TransitGraph::build(abc_stations(), abc_routes()).unwrap()
    }

    #[test]
    fn build_counts_and_lookup() {
        let graph = abc();
        assert_eq!(graph.station_count(), 3);
        assert_eq!(graph.route_count(), 3);
        assert!(graph.has_station("A"));
        assert!(!graph.has_station("Z"));
        assert_eq!(graph.station("B").unwrap().name, "Beta");
    }

    #[test]
    fn defaults_are_applied() {
        let graph = abc();
        let station = graph.station("A").unwrap();
        assert_eq!(station.kind, StationKind::Normal);
        assert!(station.services.is_empty());

        let route = &graph.routes()[0];
        assert_eq!(route.distance, 0.0);
        assert_eq!(route.mode, TransportMode::Bus);
        assert_eq!(route.frequency, 15.0);
    }

    #[test]
    fn neighbors_are_undirected_and_ordered() {
        let graph = abc();

        let from_a: Vec<&str> = graph
            .neighbors("A")
            .unwrap()
            .into_iter()
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(from_a, vec!["B", "C"]);

        let from_c: Vec<(&str, f64)> = graph
            .neighbors("C")
            .unwrap()
            .into_iter()
            .map(|(id, r)| (id.as_str(), r.time))
            .collect();
        assert_eq!(from_c, vec![("B", 3.0), ("A", 10.0)]);

        assert!(graph.neighbors("Z").is_none());
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut routes = abc_routes();
        routes.push(RouteRecord::new("B", "A", 1.0, 9.0).with_mode("metro"));
        let graph = TransitGraph::build(abc_stations(), routes).unwrap();

        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        let edges: Vec<EdgeIdx> = graph.edges_between(a, b).collect();
        assert_eq!(edges, vec![EdgeIdx(0), EdgeIdx(3)]);
        assert_eq!(graph.route_at(EdgeIdx(3)).mode, TransportMode::Metro);
    }

    #[test]
    fn self_loop_listed_once() {
        let mut routes = abc_routes();
        routes.push(RouteRecord::new("A", "A", 1.0, 0.0));
        let graph = TransitGraph::build(abc_stations(), routes).unwrap();
        assert_eq!(graph.neighbors("A").unwrap().len(), 3);
    }

    #[test]
    fn missing_station_fields_rejected() {
        for field in ["id", "name", "lon", "lat"] {
            let mut stations = abc_stations();
            match field {
                "id" => stations[1].id = None,
                "name" => stations[1].name = None,
                "lon" => stations[1].lon = None,
                _ => stations[1].lat = None,
            }
            let err = TransitGraph::build(stations, vec![]).unwrap_err();
            assert_eq!(
                err,
                ValidationError::MissingField {
                    record: RecordKind::Station,
                    index: 1,
                    field,
                }
            );
        }
    }

    #[test]
    fn duplicate_station_rejected() {
        let mut stations = abc_stations();
        stations.push(StationRecord::new(" A ", "Again", 2.0, 2.0));
        let err = TransitGraph::build(stations, vec![]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateStation { index: 3, .. }));
    }

    #[test]
    fn route_to_unknown_station_rejected() {
        let mut routes = abc_routes();
        routes.push(RouteRecord::new("A", "Z", 1.0, 1.0));
        let err = TransitGraph::build(abc_stations(), routes).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownStation {
                index: 3,
                id: StationId::parse("Z").unwrap(),
            }
        );
    }

    #[test]
    fn missing_route_fields_rejected() {
        let mut record = RouteRecord::new("A", "B", 1.0, 1.0);
        record.time = None;
        let err = TransitGraph::build(abc_stations(), vec![record]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingField {
                record: RecordKind::Route,
                field: "time",
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_values_rejected() {
        let cases = [
            (RouteRecord::new("A", "B", 0.0, 1.0), "time"),
            (RouteRecord::new("A", "B", -1.0, 1.0), "time"),
            (RouteRecord::new("A", "B", 1.0, -0.5), "cost"),
            (RouteRecord::new("A", "B", f64::NAN, 1.0), "time"),
            (RouteRecord::new("A", "B", 1.0, 1.0).with_distance(-2.0), "distance"),
            (RouteRecord::new("A", "B", 1e308, 1.0), "time"),
            (RouteRecord::new("A", "B", 1.0, f64::INFINITY), "cost"),
            (RouteRecord::new("A", "B", 1.0, 1.0).with_distance(1e10), "distance"),
            (RouteRecord::new("A", "B", 1.0, 1.0).with_mode("zeppelin"), "mode"),
        ];

        for (record, expected) in cases {
            let err = TransitGraph::build(abc_stations(), vec![record]).unwrap_err();
            match err {
                ValidationError::InvalidValue { field, .. } => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }

        let mut freq = RouteRecord::new("A", "B", 1.0, 1.0);
        freq.frequency = Some(0.0);
        assert!(TransitGraph::build(abc_stations(), vec![freq]).is_err());
    }

    #[test]
    fn largest_quantities_accepted() {
        let record = RouteRecord::new("A", "B", MAX_ROUTE_QUANTITY, MAX_ROUTE_QUANTITY)
            .with_distance(MAX_ROUTE_QUANTITY);
        let graph = TransitGraph::build(abc_stations(), vec![record]).unwrap();
        assert_eq!(graph.routes()[0].time, MAX_ROUTE_QUANTITY);
    }

    #[test]
    fn zero_cost_and_distance_allowed() {
        let record = RouteRecord::new("A", "B", 1.0, 0.0).with_distance(0.0);
        assert!(TransitGraph::build(abc_stations(), vec![record]).is_ok());
    }

    #[test]
    fn invalid_station_values_rejected() {
        let mut stations = abc_stations();
        stations[0].lat = Some(95.0);
        assert!(matches!(
            TransitGraph::build(stations, vec![]),
            Err(ValidationError::InvalidValue { field: "position", .. })
        ));

        let mut stations = abc_stations();
        stations[0].kind = Some("hub".to_string());
        assert!(matches!(
            TransitGraph::build(stations, vec![]),
            Err(ValidationError::InvalidValue { field: "type", .. })
        ));

        let mut stations = abc_stations();
        stations[0].name = Some("  ".to_string());
        assert!(matches!(
            TransitGraph::build(stations, vec![]),
            Err(ValidationError::InvalidValue { field: "name", .. })
        ));
    }

    #[test]
    fn find_station_normalizes_input() {
        let graph = abc();
        assert_eq!(graph.find_station("A").unwrap().id.as_str(), "A");
        assert_eq!(graph.find_station(" a ").unwrap().id.as_str(), "A");
        assert_eq!(graph.find_station("gamma").unwrap().id.as_str(), "C");
        assert!(graph.find_station("delta").is_none());
        assert!(graph.find_station("  ").is_none());
    }

    #[test]
    fn services_are_trimmed_and_deduplicated() {
        let mut stations = abc_stations();
        stations[0].services = vec!["wifi".into(), " wifi ".into(), "".into(), "parking".into()];
        let graph = TransitGraph::build(stations, vec![]).unwrap();
        let services: Vec<&str> = graph
            .station("A")
            .unwrap()
            .services
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(services, vec!["parking", "wifi"]);
    }

    #[test]
    fn load_reports_validation_errors() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"stations": [{{"id": "A", "name": "Alpha", "lon": 0, "lat": 0}}],
                "routes": [{{"origin": "A", "destination": "B", "time": 1, "cost": 1}}]}}"#
        )
        .unwrap();

        let err = TransitGraph::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Validation(ValidationError::UnknownStation { .. })
        ));
    }

    #[test]
    fn graph_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransitGraph>();
    }

    #[test]
    fn bundled_sample_network_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/network.json");
        let graph = TransitGraph::load(path).unwrap();

        assert_eq!(graph.station_count(), 9);
        assert_eq!(graph.route_count(), 13);
        assert_eq!(graph.station("ZOC").unwrap().kind, StationKind::Principal);
        assert_eq!(graph.find_station("buenavista").unwrap().id.as_str(), "BUE");
        assert!(graph.neighbors("HID").unwrap().len() >= 3);
    }
}
