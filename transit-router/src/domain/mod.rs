//! Domain types for the transit network.
//!
//! Stations and routes as they exist once a network description has been
//! validated. All types enforce their invariants at construction time, so
//! code that receives them can trust their validity.

mod error;
mod route;
mod station;

pub use error::{RecordKind, ValidationError};
pub use route::{DEFAULT_FREQUENCY_MINS, Route, TransportMode};
pub use station::{InvalidStationId, Position, Station, StationId, StationKind};
