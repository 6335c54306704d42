//! Great-circle heuristic for A*.
//!
//! The estimate is `scale * great_circle_km(node, goal)`, where `scale` is
//! the largest factor such that every edge weight is at least `scale` times
//! the straight-line length of that edge. Summing over any path and applying
//! the triangle inequality shows the estimate never exceeds the true
//! remaining weight, and that it is consistent across every edge. This holds
//! for any non-negative criterion, so the same construction serves time,
//! cost, distance and the combined metric.

use crate::domain::Position;
use crate::network::{StationIdx, TransitGraph};

use super::criterion::EdgeWeights;

/// Shrinks the scale slightly so rounding cannot push an estimate above
/// the true remaining weight.
const SCALE_SLACK: f64 = 1.0 - 1e-9;

/// Admissible, consistent estimate of remaining weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heuristic {
    scale: f64,
}

impl Heuristic {
    /// A heuristic that always estimates zero (plain Dijkstra).
    pub fn zero() -> Self {
        Self { scale: 0.0 }
    }

    /// Derive the scale from a weight overlay.
    ///
    /// Degrades to zero when some edge of positive length weighs nothing, or
    /// when no edge has positive length.
    pub fn for_weights(graph: &TransitGraph, weights: &EdgeWeights) -> Self {
        let mut scale = f64::INFINITY;

        for (i, station) in graph.stations().iter().enumerate() {
            for &(next, edge) in graph.adjacent(StationIdx(i)) {
                let km = station
                    .position
                    .great_circle_km(&graph.station_at(next).position);
                if km > 0.0 {
                    scale = scale.min(weights.get(edge) / km);
                }
            }
        }

        if scale.is_finite() {
            Self {
                scale: scale * SCALE_SLACK,
            }
        } else {
            Self::zero()
        }
    }

    /// Weight units per kilometre of straight-line distance.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Estimated remaining weight from `from` to `goal`.
    pub fn estimate(&self, from: &Position, goal: &Position) -> f64 {
        if self.scale == 0.0 {
            0.0
        } else {
            self.scale * from.great_circle_km(goal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{RouteRecord, StationRecord};
    use crate::planner::criterion::{CombinedWeights, Criterion, resolve};

    fn line_graph(routes: Vec<RouteRecord>) -> TransitGraph {
        TransitGraph::build(
            vec![
                StationRecord::new("A", "Alpha", 0.0, 0.0),
                StationRecord::new("B", "Beta", 0.0, 1.0),
                StationRecord::new("C", "Gamma", 0.0, 2.0),
            ],
            routes,
        )
        .unwrap()
    }

    #[test]
    fn zero_estimates_nothing() {
        let a = Position::new(0.0, 0.0).unwrap();
        let b = Position::new(10.0, 10.0).unwrap();
        assert_eq!(Heuristic::zero().estimate(&a, &b), 0.0);
    }

    #[test]
    fn scale_is_tightest_edge_ratio() {
        let graph = line_graph(vec![
            RouteRecord::new("A", "B", 10.0, 1.0),
            RouteRecord::new("B", "C", 20.0, 1.0),
        ]);
        let weights = resolve(&graph, Criterion::Time, &CombinedWeights::default());
        let h = Heuristic::for_weights(&graph, &weights);

        let one_degree = graph.stations()[0]
            .position
            .great_circle_km(&graph.stations()[1].position);
        let expected = 10.0 / one_degree;
        assert!((h.scale() - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_weight_edge_disables_heuristic() {
        let graph = line_graph(vec![
            RouteRecord::new("A", "B", 10.0, 0.0),
            RouteRecord::new("B", "C", 20.0, 3.0),
        ]);
        let weights = resolve(&graph, Criterion::Cost, &CombinedWeights::default());
        assert_eq!(Heuristic::for_weights(&graph, &weights).scale(), 0.0);
    }

    #[test]
    fn co_located_stations_ignored() {
        let graph = TransitGraph::build(
            vec![
                StationRecord::new("A", "Alpha", 0.0, 0.0),
                StationRecord::new("B", "Beta", 0.0, 0.0),
            ],
            vec![RouteRecord::new("A", "B", 1.0, 1.0)],
        )
        .unwrap();
        let weights = resolve(&graph, Criterion::Time, &CombinedWeights::default());
        assert_eq!(Heuristic::for_weights(&graph, &weights), Heuristic::zero());
    }

    #[test]
    fn never_overestimates_an_edge() {
        let graph = line_graph(vec![
            RouteRecord::new("A", "B", 7.0, 3.0).with_distance(110.0),
            RouteRecord::new("B", "C", 4.0, 8.0).with_distance(120.0),
            RouteRecord::new("A", "C", 30.0, 2.0).with_distance(230.0),
        ]);

        for criterion in Criterion::ALL {
            let weights = resolve(&graph, criterion, &CombinedWeights::default());
            let h = Heuristic::for_weights(&graph, &weights);
            for route in graph.routes() {
                let a = graph.station(route.origin.as_str()).unwrap().position;
                let b = graph.station(route.destination.as_str()).unwrap().position;
                let w = criterion.weight_of(route, &CombinedWeights::default());
                assert!(h.estimate(&a, &b) <= w, "{criterion}: {} > {w}", h.estimate(&a, &b));
            }
        }
    }
}
