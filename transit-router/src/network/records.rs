//! Raw network description records.
//!
//! These mirror the JSON network file. Every field is optional here so that
//! a missing field is reported as a [`ValidationError`](crate::domain::ValidationError)
//! by the graph builder rather than as a parse failure.

use std::path::Path;

use serde::Deserialize;

use super::error::LoadError;

/// A station record as read from the network description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationRecord {
    pub id: Option<String>,

    #[serde(alias = "nombre")]
    pub name: Option<String>,

    #[serde(alias = "longitude")]
    pub lon: Option<f64>,

    #[serde(alias = "latitude")]
    pub lat: Option<f64>,

    /// Station type: normal, intermodal or principal
    #[serde(rename = "type", alias = "tipo")]
    pub kind: Option<String>,

    #[serde(default, alias = "servicios")]
    pub services: Vec<String>,
}

impl StationRecord {
    /// Convenience constructor for a station with only the required fields.
    pub fn new(id: &str, name: &str, lon: f64, lat: f64) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            lon: Some(lon),
            lat: Some(lat),
            kind: None,
            services: Vec::new(),
        }
    }
}

/// A route record as read from the network description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteRecord {
    #[serde(alias = "origen")]
    pub origin: Option<String>,

    #[serde(alias = "destino")]
    pub destination: Option<String>,

    /// Minutes
    #[serde(alias = "tiempo")]
    pub time: Option<f64>,

    /// Currency units
    #[serde(alias = "costo")]
    pub cost: Option<f64>,

    /// Kilometres, 0 when absent
    #[serde(alias = "distancia")]
    pub distance: Option<f64>,

    #[serde(alias = "modo")]
    pub mode: Option<String>,

    /// Minutes between services, 15 when absent
    #[serde(alias = "frecuencia")]
    pub frequency: Option<f64>,
}

impl RouteRecord {
    /// Convenience constructor for a route with only the required fields.
    pub fn new(origin: &str, destination: &str, time: f64, cost: f64) -> Self {
        Self {
            origin: Some(origin.to_string()),
            destination: Some(destination.to_string()),
            time: Some(time),
            cost: Some(cost),
            ..Self::default()
        }
    }

    /// Set the distance in kilometres.
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Set the transport mode by name.
    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }
}

/// A complete network description: all stations and all routes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NetworkDescription {
    #[serde(default, alias = "estaciones")]
    pub stations: Vec<StationRecord>,

    #[serde(default, alias = "rutas")]
    pub routes: Vec<RouteRecord>,
}

impl NetworkDescription {
    /// Parse a network description from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a network description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_english_keys() {
        let json = r#"{
            "stations": [
                {"id": "A", "name": "Alpha", "lon": 0.0, "lat": 0.0, "type": "principal", "services": ["wifi"]},
                {"id": "B", "name": "Beta", "longitude": 0.0, "latitude": 1.0}
            ],
            "routes": [
                {"origin": "A", "destination": "B", "time": 5, "cost": 2, "mode": "metro"}
            ]
        }"#;

        let desc = NetworkDescription::from_json_str(json).unwrap();
        assert_eq!(desc.stations.len(), 2);
        assert_eq!(desc.stations[0].kind.as_deref(), Some("principal"));
        assert_eq!(desc.stations[0].services, vec!["wifi".to_string()]);
        assert_eq!(desc.stations[1].lat, Some(1.0));
        assert!(desc.stations[1].services.is_empty());

        let route = &desc.routes[0];
        assert_eq!(route.time, Some(5.0));
        assert_eq!(route.distance, None);
        assert_eq!(route.frequency, None);
        assert_eq!(route.mode.as_deref(), Some("metro"));
    }

    #[test]
    fn parse_spanish_keys() {
        let json = r#"{
            "estaciones": [
                {"id": "A", "nombre": "Centro", "lon": -3.7, "lat": 40.4, "tipo": "intermodal"}
            ],
            "rutas": [
                {"origen": "A", "destino": "A", "tiempo": 1, "costo": 0, "distancia": 0.5, "modo": "tren", "frecuencia": 10}
            ]
        }"#;

        let desc = NetworkDescription::from_json_str(json).unwrap();
        assert_eq!(desc.stations[0].name.as_deref(), Some("Centro"));
        assert_eq!(desc.stations[0].kind.as_deref(), Some("intermodal"));
        assert_eq!(desc.routes[0].origin.as_deref(), Some("A"));
        assert_eq!(desc.routes[0].distance, Some(0.5));
        assert_eq!(desc.routes[0].frequency, Some(10.0));
    }

    #[test]
    fn missing_fields_parse_as_none() {
        let json = r#"{"stations": [{"id": "A"}], "routes": [{}]}"#;
        let desc = NetworkDescription::from_json_str(json).unwrap();
        assert_eq!(desc.stations[0].name, None);
        assert_eq!(desc.routes[0], RouteRecord::default());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = NetworkDescription::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"stations": [{{"id": "A", "name": "Alpha", "lon": 0, "lat": 0}}], "routes": []}}"#
        )
        .unwrap();

        let desc = NetworkDescription::from_path(file.path()).unwrap();
        assert_eq!(desc.stations.len(), 1);
        assert!(desc.routes.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetworkDescription::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
