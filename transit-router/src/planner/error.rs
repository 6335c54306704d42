//! Route planning errors.

use crate::domain::StationId;

/// Broad class of a planning failure, for choosing how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The query itself is wrong and the caller can correct it.
    InvalidInput,
    /// The query is valid but the stations are not connected.
    NoPath,
    /// The search gave up before finishing.
    Unavailable,
    /// A consistency bug inside the planner.
    Internal,
}

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Origin or destination is not in the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Criterion name not recognised
    #[error("invalid criterion '{0}': expected one of time, cost, distance, combined")]
    InvalidCriterion(String),

    /// Algorithm name not recognised
    #[error("invalid algorithm '{0}': expected dijkstra or astar")]
    InvalidAlgorithm(String),

    /// The stations exist but are not connected
    #[error("no path from {origin} to {destination}")]
    NoPathFound {
        origin: StationId,
        destination: StationId,
    },

    /// The configured settle limit was reached before the destination
    #[error("search stopped after settling {limit} stations")]
    SearchLimitExceeded { limit: usize },

    /// Consecutive path stations have no connecting route
    #[error("internal error: no route connects {from} and {to}")]
    MissingEdge { from: StationId, to: StationId },
}

impl PlanError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::UnknownStation(_)
            | PlanError::InvalidCriterion(_)
            | PlanError::InvalidAlgorithm(_) => ErrorKind::InvalidInput,
            PlanError::NoPathFound { .. } => ErrorKind::NoPath,
            PlanError::SearchLimitExceeded { .. } => ErrorKind::Unavailable,
            PlanError::MissingEdge { .. } => ErrorKind::Internal,
        }
    }
}
