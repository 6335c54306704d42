//! Route planner.
//!
//! This module answers: "what is the best way from station A to station B,
//! measured by time, fare, distance or a blend of the three?"
//!
//! A query resolves its criterion into a per-edge weight overlay, runs
//! Dijkstra or A* over the shared graph, and breaks the resulting path into
//! one segment per traversed route.

mod config;
mod criterion;
mod decompose;
mod error;
mod heuristic;
mod search;

pub use config::PlannerConfig;
pub use criterion::{
    CombinedWeights, Criterion, EdgeWeights, InvalidCombinedWeights, MAX_COEFFICIENT, resolve,
};
pub use decompose::{SegmentDetail, decompose};
pub use error::{ErrorKind, PlanError};
pub use heuristic::Heuristic;
pub use search::{Algorithm, Planner, RouteQuery, RouteResult, find_path};
