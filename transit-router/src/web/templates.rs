//! Askama templates for the web frontend.

use askama::Template;
use chrono::{DateTime, Local};

use crate::network::TransitGraph;
use crate::planner::{Algorithm, Criterion, RouteResult, SegmentDetail};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<ChoiceView>,
    pub criteria: Vec<ChoiceView>,
    pub algorithms: Vec<ChoiceView>,
    pub station_count: usize,
    pub route_count: usize,
}

impl IndexTemplate {
    /// Build the form from the network and the default algorithm.
    pub fn new(graph: &TransitGraph, default_algorithm: Algorithm) -> Self {
        let stations = graph
            .stations()
            .iter()
            .map(|s| ChoiceView {
                value: s.id.to_string(),
                label: format!("{} ({})", s.name, s.id),
                selected: false,
            })
            .collect();

        let criteria = Criterion::ALL
            .iter()
            .map(|c| ChoiceView {
                value: c.as_str().to_string(),
                label: c.label().to_string(),
                selected: *c == Criterion::Time,
            })
            .collect();

        let algorithms = Algorithm::ALL
            .iter()
            .map(|a| ChoiceView {
                value: a.as_str().to_string(),
                label: match a {
                    Algorithm::Dijkstra => "Dijkstra".to_string(),
                    Algorithm::AStar => "A*".to_string(),
                },
                selected: *a == default_algorithm,
            })
            .collect();

        Self {
            stations,
            criteria,
            algorithms,
            station_count: graph.station_count(),
            route_count: graph.route_count(),
        }
    }
}

/// Route report page.
#[derive(Template)]
#[template(path = "route_report.html")]
pub struct RouteReportTemplate {
    pub report: RouteReportView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// An `<option>` in a select box.
#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A station along the route.
#[derive(Debug, Clone)]
pub struct StopView {
    pub order: usize,
    pub id: String,
    pub name: String,
    pub kind: String,
    pub coordinates: String,
}

/// One segment row of the report.
#[derive(Debug, Clone)]
pub struct SegmentView {
    pub index: usize,
    pub origin_name: String,
    pub destination_name: String,
    pub mode: String,
    pub time: String,
    pub cost: String,
    pub distance: String,
    pub frequency: String,
}

impl SegmentView {
    pub fn from_segment(segment: &SegmentDetail) -> Self {
        Self {
            index: segment.index,
            origin_name: segment.origin_name.clone(),
            destination_name: segment.destination_name.clone(),
            mode: segment.mode.to_string(),
            time: format!("{:.1}", segment.time),
            cost: format!("{:.2}", segment.cost),
            distance: format!("{:.2}", segment.distance),
            frequency: format!("every {:.0} min", segment.frequency),
        }
    }
}

/// Everything the report page shows.
#[derive(Debug, Clone)]
pub struct RouteReportView {
    pub origin_name: String,
    pub destination_name: String,
    pub criterion: String,
    pub algorithm: String,
    pub label: String,
    pub total: String,
    pub total_time: String,
    pub total_cost: String,
    pub total_distance: String,
    pub mode_changes: usize,
    /// Modes in order of first use, e.g. "metro, bus"
    pub modes: String,
    pub stations_settled: usize,
    pub generated_at: String,
    pub stops: Vec<StopView>,
    pub segments: Vec<SegmentView>,
}

impl RouteReportView {
    /// Create from a planner result.
    pub fn from_result(result: &RouteResult, graph: &TransitGraph, generated_at: DateTime<Local>) -> Self {
        let stops: Vec<StopView> = result
            .path
            .iter()
            .filter_map(|id| graph.station(id.as_str()))
            .enumerate()
            .map(|(i, s)| StopView {
                order: i + 1,
                id: s.id.to_string(),
                name: s.name.clone(),
                kind: s.kind.to_string(),
                coordinates: format!("{:.5}, {:.5}", s.position.lat, s.position.lon),
            })
            .collect();

        let origin_name = stops.first().map(|s| s.name.clone()).unwrap_or_default();
        let destination_name = stops.last().map(|s| s.name.clone()).unwrap_or_default();

        Self {
            origin_name,
            destination_name,
            criterion: result.criterion.to_string(),
            algorithm: result.algorithm.to_string(),
            label: result.label.to_string(),
            total: format!("{:.2}", result.total),
            total_time: format!("{:.1}", result.total_time()),
            total_cost: format!("{:.2}", result.total_cost()),
            total_distance: format!("{:.2}", result.total_distance()),
            mode_changes: result.mode_changes(),
            modes: result
                .modes()
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            stations_settled: result.stations_settled,
            generated_at: generated_at.format("%Y-%m-%d %H:%M").to_string(),
            stops,
            segments: result.segments.iter().map(SegmentView::from_segment).collect(),
        }
    }

    /// Whether origin and destination are the same station.
    pub fn is_stay(&self) -> bool {
        self.segments.is_empty()
    }
}
