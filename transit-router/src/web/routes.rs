//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::planner::{ErrorKind, PlanError, Planner, RouteQuery, RouteResult};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/network", get(network))
        .route("/route", get(route_page))
        .route("/api/route", post(plan_route))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate::new(&state.graph, state.config.default_algorithm);
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Every station and route, for map clients.
async fn network(State(state): State<AppState>) -> Json<NetworkResponse> {
    Json(NetworkResponse::from_graph(&state.graph))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse and run a route request against the shared graph.
fn run_query(state: &AppState, req: &RouteRequest) -> Result<RouteResult, PlanError> {
    let query = RouteQuery::parse(
        &req.origin,
        &req.destination,
        &req.criterion,
        req.algorithm.as_deref(),
        state.config.default_algorithm,
    )?;
    debug!(
        origin = %query.origin,
        destination = %query.destination,
        criterion = %query.criterion,
        algorithm = %query.algorithm,
        "planning route"
    );
    Planner::new(&state.graph, &state.config).plan(&query)
}

/// Plan a route from query parameters.
///
/// Renders the route report for browsers, JSON otherwise.
async fn route_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RouteRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);

    let req = match query {
        Ok(Query(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected route query");
            let err = AppError::BadRequest {
                message: format!("Invalid request: {}", rejection.body_text()),
            };
            return Err(if html { err.into_page() } else { err });
        }
    };

    let result = match run_query(&state, &req) {
        Ok(result) => result,
        Err(e) if html => return Err(AppError::from(e).into_page()),
        Err(e) => return Err(e.into()),
    };

    if html {
        let template = RouteReportTemplate {
            report: RouteReportView::from_result(&result, &state.graph, Local::now()),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(RouteResponse::from_result(&result, &state.graph)).into_response())
    }
}

/// Plan a route from a JSON body.
async fn plan_route(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: RouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "rejected route request");
        AppError::BadRequest {
            message: format!("Invalid request: {}", e),
        }
    })?;

    let result = run_query(&state, &req)?;
    Ok(Json(RouteResponse::from_result(&result, &state.graph)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
    /// Render the wrapped error as an HTML page instead of JSON.
    Page(Box<AppError>),
}

impl AppError {
    /// Switch to the HTML error page.
    pub fn into_page(self) -> Self {
        match self {
            AppError::Page(_) => self,
            other => AppError::Page(Box::new(other)),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, "invalid_input", message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "no_path", message),
            AppError::Unavailable { message } => {
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable", message)
            }
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
            }
            AppError::Page(inner) => inner.parts(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e.kind() {
            ErrorKind::InvalidInput => AppError::BadRequest { message },
            ErrorKind::NoPath => AppError::NotFound { message },
            ErrorKind::Unavailable => AppError::Unavailable { message },
            ErrorKind::Internal => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind, message) = self.parts();

        if status.is_server_error() {
            error!(%status, kind, "{message}");
        } else {
            debug!(%status, kind, "{message}");
        }

        if let AppError::Page(_) = &self {
            let title = status.canonical_reason().unwrap_or("Error").to_string();
            let page = ErrorTemplate {
                title,
                message: message.to_string(),
                details: None,
            };
            if let Ok(html) = page.render() {
                return (status, Html(html)).into_response();
            }
        }

        let body = Json(ErrorResponse {
            error: message.to_string(),
            kind,
        });
        (status, body).into_response()
    }
}
