//! Application state shared across handlers

use std::sync::Arc;

use application::{ForecastPipeline, PipelineStatus};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pipeline used for manual runs
    pub pipeline: Arc<ForecastPipeline>,
    /// Status the scheduler and pipeline report into
    pub status: Arc<PipelineStatus>,
}

impl AppState {
    pub fn new(pipeline: Arc<ForecastPipeline>) -> Self {
        let status = pipeline.status();
        Self { pipeline, status }
    }
}
