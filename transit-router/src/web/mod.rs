//! Web layer for the transit router.
//!
//! Provides HTTP endpoints for planning routes and browsing the network.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
