//! Per-segment breakdown of a route.

use serde::Serialize;
use tracing::error;

use crate::domain::{StationId, TransportMode};
use crate::network::{EdgeIdx, StationIdx, TransitGraph};

use super::error::PlanError;

/// One traversed route within a journey, oriented in travel direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentDetail {
    /// 1-based position in the journey.
    pub index: usize,
    pub origin_id: StationId,
    pub origin_name: String,
    pub destination_id: StationId,
    pub destination_name: String,
    pub time: f64,
    pub cost: f64,
    pub distance: f64,
    pub mode: TransportMode,
    pub frequency: f64,
}

/// Expand a station sequence into segments.
///
/// For each consecutive pair the first route (in input order) joining them
/// is used. Paths shorter than two stations have no segments.
///
/// # Errors
///
/// [`PlanError::MissingEdge`] if some consecutive pair is not joined by any
/// route. For a path produced by the planner on the same graph this is a bug.
pub fn decompose(graph: &TransitGraph, path: &[StationId]) -> Result<Vec<SegmentDetail>, PlanError> {
    let mut segments = Vec::with_capacity(path.len().saturating_sub(1));

    for (i, pair) in path.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);

        let edge = graph
            .index_of(from.as_str())
            .zip(graph.index_of(to.as_str()))
            .and_then(|(a, b)| graph.edges_between(a, b).next().map(|edge| (a, b, edge)));

        let Some((a, b, edge)) = edge else {
            error!(from = %from, to = %to, "no route between consecutive path stations");
            return Err(PlanError::MissingEdge {
                from: from.clone(),
                to: to.clone(),
            });
        };

        segments.push(segment(graph, i + 1, a, b, edge));
    }

    Ok(segments)
}

/// Build segments from the hops a search actually traversed.
pub(crate) fn segments_from_hops(
    graph: &TransitGraph,
    hops: &[(StationIdx, StationIdx, EdgeIdx)],
) -> Vec<SegmentDetail> {
    hops.iter()
        .enumerate()
        .map(|(i, &(from, to, edge))| segment(graph, i + 1, from, to, edge))
        .collect()
}

fn segment(
    graph: &TransitGraph,
    index: usize,
    from: StationIdx,
    to: StationIdx,
    edge: EdgeIdx,
) -> SegmentDetail {
    let origin = graph.station_at(from);
    let destination = graph.station_at(to);
    let route = graph.route_at(edge);

    SegmentDetail {
        index,
        origin_id: origin.id.clone(),
        origin_name: origin.name.clone(),
        destination_id: destination.id.clone(),
        destination_name: destination.name.clone(),
        time: route.time,
        cost: route.cost,
        distance: route.distance,
        mode: route.mode,
        frequency: route.frequency,
    }
}
