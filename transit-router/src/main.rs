use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_router::network::TransitGraph;
use transit_router::planner::{Algorithm, CombinedWeights, MAX_COEFFICIENT, PlannerConfig};
use transit_router::web::{AppState, create_router};

/// Network file used when neither an argument nor `NETWORK_PATH` is given.
const DEFAULT_NETWORK_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/network.json");

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Build the planner configuration, overriding defaults from the environment.
///
/// Unparseable values are logged and ignored.
fn planner_config_from_env() -> PlannerConfig {
    let defaults = PlannerConfig::default();

    let algorithm = match std::env::var("ROUTE_DEFAULT_ALGORITHM") {
        Ok(value) => value.parse::<Algorithm>().unwrap_or_else(|e| {
            warn!("Ignoring ROUTE_DEFAULT_ALGORITHM: {e}");
            defaults.default_algorithm
        }),
        Err(_) => defaults.default_algorithm,
    };

    let max_settled = match std::env::var("ROUTE_MAX_SETTLED") {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => Some(limit),
            _ => {
                warn!("Ignoring ROUTE_MAX_SETTLED: expected a positive integer, got '{value}'");
                defaults.max_settled
            }
        },
        Err(_) => defaults.max_settled,
    };

    // "time,cost,distance", e.g. "0.5,0.3,0.2"
    let combined = match std::env::var("ROUTE_COMBINED_WEIGHTS") {
        Ok(value) => parse_combined(&value).unwrap_or_else(|| {
            warn!("Ignoring ROUTE_COMBINED_WEIGHTS: expected three numbers in [0, {MAX_COEFFICIENT}], got '{value}'");
            defaults.combined
        }),
        Err(_) => defaults.combined,
    };

    PlannerConfig::new(combined, algorithm, max_settled)
}

fn parse_combined(value: &str) -> Option<CombinedWeights> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        &[time, cost, distance] => CombinedWeights::new(time, cost, distance).ok(),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let network_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NETWORK_PATH").ok())
        .unwrap_or_else(|| DEFAULT_NETWORK_PATH.to_string());

    // Load the network (fail fast if unusable)
    info!(path = %network_path, "Loading network");
    let graph = TransitGraph::load(&network_path).expect("Failed to load transit network");

    let config = planner_config_from_env();
    info!(
        algorithm = %config.default_algorithm,
        max_settled = ?config.max_settled,
        "Planner configured"
    );

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    let state = AppState::new(graph, config);
    let app = create_router(state, &static_dir);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR must be a socket address");

    info!("Transit router listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health       - Health check");
    info!("  GET  /api/network  - Stations and routes");
    info!("  GET  /route        - Plan a route (HTML or JSON)");
    info!("  POST /api/route    - Plan a route (JSON)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
