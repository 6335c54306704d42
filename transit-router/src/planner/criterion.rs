//! Edge-weight criteria and per-query weight overlays.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::Route;
use crate::network::{EdgeIdx, TransitGraph};

use super::error::PlanError;

/// The metric a route is optimised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Travel time in minutes
    Time,
    /// Fare in currency units
    Cost,
    /// Length in kilometres
    Distance,
    /// Linear blend of time, cost and distance
    Combined,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Time,
        Criterion::Cost,
        Criterion::Distance,
        Criterion::Combined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Cost => "cost",
            Criterion::Distance => "distance",
            Criterion::Combined => "combined",
        }
    }

    /// Description of the total, including its unit.
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Time => "Total time (min)",
            Criterion::Cost => "Total cost ($)",
            Criterion::Distance => "Total distance (km)",
            Criterion::Combined => "Combined score",
        }
    }

    /// Weight of a single route under this criterion.
    pub fn weight_of(&self, route: &Route, combined: &CombinedWeights) -> f64 {
        match self {
            Criterion::Time => route.time,
            Criterion::Cost => route.cost,
            Criterion::Distance => route.distance,
            Criterion::Combined => combined.apply(route),
        }
    }
}

impl FromStr for Criterion {
    type Err = PlanError;

    /// Case-insensitive; the Spanish names are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" | "tiempo" => Ok(Criterion::Time),
            "cost" | "costo" => Ok(Criterion::Cost),
            "distance" | "distancia" => Ok(Criterion::Distance),
            "combined" | "combinado" => Ok(Criterion::Combined),
            _ => Err(PlanError::InvalidCriterion(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for unusable combined-metric coefficients.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("combined weight coefficients must be between 0 and {MAX_COEFFICIENT}")]
pub struct InvalidCombinedWeights;

/// Upper bound on a combined-metric coefficient.
pub const MAX_COEFFICIENT: f64 = 1e6;

/// Coefficients of the combined metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedWeights {
    time: f64,
    cost: f64,
    distance: f64,
}

impl CombinedWeights {
    /// Create coefficients. All must lie in `0..=MAX_COEFFICIENT`, which keeps
    /// every combined edge weight non-negative and bounded.
    pub fn new(time: f64, cost: f64, distance: f64) -> Result<Self, InvalidCombinedWeights> {
        let valid = |v: f64| (0.0..=MAX_COEFFICIENT).contains(&v);
        if valid(time) && valid(cost) && valid(distance) {
            Ok(Self {
                time,
                cost,
                distance,
            })
        } else {
            Err(InvalidCombinedWeights)
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Combined weight of a route.
    pub fn apply(&self, route: &Route) -> f64 {
        self.time * route.time + self.cost * route.cost + self.distance * route.distance
    }
}

impl Default for CombinedWeights {
    fn default() -> Self {
        Self {
            time: 0.5,
            cost: 0.3,
            distance: 0.2,
        }
    }
}

/// Edge weights for one query, indexed by edge.
///
/// The overlay is computed from the graph on every request and never written
/// back, so a shared graph stays read-only under concurrent queries.
#[derive(Debug, Clone)]
pub struct EdgeWeights {
    criterion: Criterion,
    values: Vec<f64>,
}

impl EdgeWeights {
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Weight of an edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge` did not come from the graph the overlay was built for.
    pub fn get(&self, edge: EdgeIdx) -> f64 {
        self.values[edge.0]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Produce the weight overlay for a criterion.
pub fn resolve(
    graph: &TransitGraph,
    criterion: Criterion,
    combined: &CombinedWeights,
) -> EdgeWeights {
    let values = graph
        .routes()
        .iter()
        .map(|route| criterion.weight_of(route, combined))
        .collect();

    EdgeWeights { criterion, values }
}
