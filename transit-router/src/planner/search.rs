//! Shortest-path search: Dijkstra and A*.
//!
//! Both algorithms share one relaxation loop over index arenas. The frontier
//! is a binary heap keyed by accumulated weight (plus the heuristic estimate
//! for A*); stale heap entries are skipped on pop. Predecessors are kept as a
//! parent array of `(station, edge)` pairs, so the exact edge each hop used
//! is known when the path is rebuilt.
//!
//! Ties are resolved deterministically: equal heap keys pop the station that
//! appears first in the network description, and a distance is only replaced
//! by a strictly smaller one, so the first predecessor to reach the best
//! weight is kept. Among parallel routes the cheapest wins, and among equally
//! cheap parallel routes the one listed first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::domain::{StationId, TransportMode};
use crate::network::{EdgeIdx, StationIdx, TransitGraph};

use super::config::PlannerConfig;
use super::criterion::{Criterion, EdgeWeights, resolve};
use super::decompose::{SegmentDetail, segments_from_hops};
use super::error::PlanError;
use super::heuristic::Heuristic;

/// Shortest-path algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Uniform-cost search
    #[default]
    Dijkstra,
    /// Heuristic-guided search
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::AStar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }
}

impl FromStr for Algorithm {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" | "a_star" => Ok(Algorithm::AStar),
            _ => Err(PlanError::InvalidAlgorithm(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optimal route between two stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Stations in travel order; always at least one.
    pub path: Vec<StationId>,

    /// Accumulated weight under `criterion`.
    pub total: f64,

    /// Description of `total` with its unit.
    pub label: &'static str,

    pub criterion: Criterion,

    pub algorithm: Algorithm,

    /// One entry per traversed route.
    pub segments: Vec<SegmentDetail>,

    /// Number of stations finalized by the search.
    pub stations_settled: usize,
}

impl RouteResult {
    /// Result for a journey that starts where it ends.
    fn stay(station: StationId, criterion: Criterion, algorithm: Algorithm) -> Self {
        Self {
            path: vec![station],
            total: 0.0,
            label: criterion.label(),
            criterion,
            algorithm,
            segments: Vec::new(),
            stations_settled: 0,
        }
    }

    /// Sum of segment travel times in minutes.
    pub fn total_time(&self) -> f64 {
        self.segments.iter().map(|s| s.time).sum()
    }

    /// Sum of segment fares.
    pub fn total_cost(&self) -> f64 {
        self.segments.iter().map(|s| s.cost).sum()
    }

    /// Sum of segment lengths in kilometres.
    pub fn total_distance(&self) -> f64 {
        self.segments.iter().map(|s| s.distance).sum()
    }

    /// Number of places where consecutive segments use different modes.
    pub fn mode_changes(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|pair| pair[0].mode != pair[1].mode)
            .count()
    }

    /// Distinct modes used, in order of first use.
    pub fn modes(&self) -> Vec<TransportMode> {
        let mut modes = Vec::new();
        for segment in &self.segments {
            if !modes.contains(&segment.mode) {
                modes.push(segment.mode);
            }
        }
        modes
    }
}

/// Heap entry. Ordered so `BinaryHeap` pops the smallest key first, then the
/// lowest station index.
#[derive(Debug, Clone, Copy)]
struct State {
    priority: f64,
    cost: f64,
    node: StationIdx,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Find the optimal path between two stations.
///
/// `origin` and `destination` are exact station ids. Both are checked before
/// any traversal. A self-route returns immediately with a zero total.
///
/// The search stops with [`PlanError::SearchLimitExceeded`] once it has
/// settled `config.max_settled` stations without reaching the destination.
///
/// # Errors
///
/// - [`PlanError::UnknownStation`] if either station is absent
/// - [`PlanError::NoPathFound`] if the stations are not connected
/// - [`PlanError::SearchLimitExceeded`] if the settle limit is reached
pub fn find_path(
    graph: &TransitGraph,
    origin: &str,
    destination: &str,
    weights: &EdgeWeights,
    algorithm: Algorithm,
    config: &PlannerConfig,
) -> Result<RouteResult, PlanError> {
    let start = graph
        .index_of(origin)
        .ok_or_else(|| PlanError::UnknownStation(origin.to_string()))?;
    let target = graph
        .index_of(destination)
        .ok_or_else(|| PlanError::UnknownStation(destination.to_string()))?;

    let criterion = weights.criterion();

    if start == target {
        return Ok(RouteResult::stay(
            graph.station_at(start).id.clone(),
            criterion,
            algorithm,
        ));
    }

    let heuristic = match algorithm {
        Algorithm::Dijkstra => Heuristic::zero(),
        Algorithm::AStar => Heuristic::for_weights(graph, weights),
    };
    let goal = graph.station_at(target).position;
    let estimate = |idx: StationIdx| heuristic.estimate(&graph.station_at(idx).position, &goal);

    let n = graph.station_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<(StationIdx, EdgeIdx)>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut settled = 0;

    dist[start.0] = 0.0;
    heap.push(State {
        priority: estimate(start),
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node, .. }) = heap.pop() {
        // Skip if we've found a better path
        if cost > dist[node.0] {
            continue;
        }

        settled += 1;

        if node == target {
            break;
        }

        if let Some(limit) = config.max_settled {
            if settled >= limit {
                debug!(limit, "search limit reached");
                return Err(PlanError::SearchLimitExceeded { limit });
            }
        }

        for &(next, edge) in graph.adjacent(node) {
            let next_cost = cost + weights.get(edge);
            if next_cost < dist[next.0] {
                dist[next.0] = next_cost;
                parent[next.0] = Some((node, edge));
                heap.push(State {
                    priority: next_cost + estimate(next),
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    if !dist[target.0].is_finite() {
        return Err(PlanError::NoPathFound {
            origin: graph.station_at(start).id.clone(),
            destination: graph.station_at(target).id.clone(),
        });
    }

    // Follow predecessors backward from target to start
    let mut hops = Vec::new();
    let mut current = target;
    while let Some((prev, edge)) = parent[current.0] {
        hops.push((prev, current, edge));
        current = prev;
    }
    hops.reverse();

    let mut path = Vec::with_capacity(hops.len() + 1);
    path.push(graph.station_at(start).id.clone());
    path.extend(hops.iter().map(|&(_, to, _)| graph.station_at(to).id.clone()));

    let total = dist[target.0];
    debug!(
        origin,
        destination,
        %criterion,
        %algorithm,
        total,
        settled,
        "route found"
    );

    Ok(RouteResult {
        path,
        total,
        label: criterion.label(),
        criterion,
        algorithm,
        segments: segments_from_hops(graph, &hops),
        stations_settled: settled,
    })
}

/// A route request as entered by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    /// Origin station text (id or name).
    pub origin: String,

    /// Destination station text (id or name).
    pub destination: String,

    pub criterion: Criterion,

    pub algorithm: Algorithm,
}

impl RouteQuery {
    /// Create a new query.
    pub fn new(origin: &str, destination: &str, criterion: Criterion, algorithm: Algorithm) -> Self {
        Self {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            criterion,
            algorithm,
        }
    }

    /// Parse a query from user text.
    ///
    /// A missing or blank algorithm falls back to `default_algorithm`.
    pub fn parse(
        origin: &str,
        destination: &str,
        criterion: &str,
        algorithm: Option<&str>,
        default_algorithm: Algorithm,
    ) -> Result<Self, PlanError> {
        let criterion = criterion.parse::<Criterion>()?;
        let algorithm = match algorithm.map(str::trim).filter(|a| !a.is_empty()) {
            Some(name) => name.parse::<Algorithm>()?,
            None => default_algorithm,
        };
        Ok(Self::new(origin, destination, criterion, algorithm))
    }
}

/// Route planner over a shared graph.
pub struct Planner<'a> {
    graph: &'a TransitGraph,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a TransitGraph, config: &'a PlannerConfig) -> Self {
        Self { graph, config }
    }

    /// Plan a route.
    ///
    /// Station text is resolved with [`TransitGraph::find_station`], so ids
    /// are matched case-insensitively and station names are accepted.
    pub fn plan(&self, query: &RouteQuery) -> Result<RouteResult, PlanError> {
        let origin = self
            .graph
            .find_station(&query.origin)
            .ok_or_else(|| PlanError::UnknownStation(query.origin.clone()))?;
        let destination = self
            .graph
            .find_station(&query.destination)
            .ok_or_else(|| PlanError::UnknownStation(query.destination.clone()))?;

        let weights = resolve(self.graph, query.criterion, &self.config.combined);

        find_path(
            self.graph,
            origin.id.as_str(),
            destination.id.as_str(),
            &weights,
            query.algorithm,
            self.config,
        )
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
