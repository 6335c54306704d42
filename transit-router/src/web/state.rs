//! Application state for the web layer.

use std::sync::Arc;

use crate::network::TransitGraph;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// The graph is immutable once built, so every request reads the same
/// instance without locking.
#[derive(Clone)]
pub struct AppState {
    /// The transit network
    pub graph: Arc<TransitGraph>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: TransitGraph, config: PlannerConfig) -> Self {
        Self {
            graph: Arc::new(graph),
            config: Arc::new(config),
        }
    }
}
