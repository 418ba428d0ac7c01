//! Time-series sink port

use async_trait::async_trait;
use domain::DataPoint;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Sink write failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The sink could not be reached
    #[error("Sink unavailable: {0}")]
    Unavailable(String),

    /// The sink refused the point
    #[error("Sink rejected point: {0}")]
    Rejected(String),

    /// The point cannot be represented by the sink
    #[error("Invalid point: {0}")]
    InvalidPoint(String),
}

/// Port for writing single points to a time-series store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PointSinkPort: Send + Sync {
    /// Write one point; returns once the sink acknowledged it
    async fn write_point(&self, point: &DataPoint) -> Result<(), SinkError>;
}
