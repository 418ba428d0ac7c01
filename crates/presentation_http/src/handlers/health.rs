//! Health check handlers

use application::{SchedulerState, StatusSnapshot};
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub scheduler: SchedulerState,
    pub cycles_succeeded: u64,
    pub cycles_failed: u64,
    pub last_points_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_success: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl From<StatusSnapshot> for ReadinessResponse {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            ready: snapshot.scheduler == SchedulerState::Running,
            scheduler: snapshot.scheduler,
            cycles_succeeded: snapshot.cycles_succeeded,
            cycles_failed: snapshot.cycles_failed,
            last_points_written: snapshot.last_points_written,
            last_success: snapshot.last_success,
            last_error: snapshot.last_error,
        }
    }
}

/// Readiness check - is the scheduler still polling?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let response = ReadinessResponse::from(state.status.snapshot());
    let status_code = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
