//! Network model: loading a network description and building the graph.
//!
//! A network description is a list of station records and a list of route
//! records. [`TransitGraph::build`] validates them and produces an immutable
//! undirected graph that routing queries run against.

mod error;
mod graph;
mod records;

pub use error::LoadError;
pub use graph::{EdgeIdx, MAX_ROUTE_QUANTITY, StationIdx, TransitGraph};
pub use records::{NetworkDescription, RouteRecord, StationRecord};
