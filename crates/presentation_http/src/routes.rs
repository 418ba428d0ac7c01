//! Route definitions

use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/liveness", get(handlers::health::health_check))
        .route("/readiness", get(handlers::health::readiness_check))
        // Manual cycle trigger
        .route(
            "/forecast/run",
            get(handlers::forecast::run_forecast).post(handlers::forecast::run_forecast),
        )
        .with_state(state)
}

/// Router with request tracing and a per-request deadline
///
/// Requests still running after `request_timeout` are answered with
/// `408 Request Timeout`.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    create_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
