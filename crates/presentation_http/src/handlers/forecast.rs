//! Manual forecast cycle handler

use application::CycleTrigger;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Result of a manual run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    pub points_written: usize,
}

/// Run one fetch-then-write cycle now
///
/// Waits for an in-flight scheduled cycle to finish first.
pub async fn run_forecast(State(state): State<AppState>) -> Result<Json<RunResponse>, ApiError> {
    info!("Manual forecast run requested");
    let points_written = state.pipeline.run_cycle(CycleTrigger::Manual).await?;
    Ok(Json(RunResponse { points_written }))
}
