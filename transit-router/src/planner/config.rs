//! Planner configuration.

use super::criterion::CombinedWeights;
use super::search::Algorithm;

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Coefficients of the combined criterion.
    pub combined: CombinedWeights,

    /// Algorithm used when a query does not name one.
    pub default_algorithm: Algorithm,

    /// Maximum number of stations a single search may settle.
    /// `None` means unbounded.
    pub max_settled: Option<usize>,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        combined: CombinedWeights,
        default_algorithm: Algorithm,
        max_settled: Option<usize>,
    ) -> Self {
        Self {
            combined,
            default_algorithm,
            max_settled,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            combined: CombinedWeights::default(),
            default_algorithm: Algorithm::Dijkstra,
            max_settled: None,
        }
    }
}
