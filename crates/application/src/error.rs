//! Application-level errors

use thiserror::Error;

/// Errors that fail a single poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The forecast service could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The forecast service answered with a non-200 status
    #[error("Forecast service returned status {status}")]
    Status { status: u16 },

    /// The forecast response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The forecast holds fewer samples than the horizon requires
    #[error("Insufficient data: {required} samples required, {available} available")]
    InsufficientData { required: usize, available: usize },

    /// Writing a point to the time-series sink failed
    #[error("Sink write failed at horizon slot {index}: {reason}")]
    SinkWrite { index: usize, reason: String },

    /// Any other failure (client setup, invalid configuration reaching an adapter)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors returned by the polling scheduler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The poll interval must be strictly positive
    #[error("Poll interval must be greater than zero")]
    InvalidInterval,

    /// A cycle failed and the failure policy halted polling
    #[error("Poll cycle failed: {0}")]
    Cycle(#[from] PipelineError),
}
