//! Forecast service port
//!
//! Defines the interface for retrieving a forecast for a position.

use async_trait::async_trait;
use domain::{Forecast, Position};
#[cfg(test)]
use mockall::automock;

use crate::error::PipelineError;

/// Port for the remote forecast service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch a fresh forecast for `position`
    ///
    /// Implementations issue exactly one request and never retry. Errors are
    /// classified as `Transport`, `Status` or `Decode`.
    async fn fetch_forecast(&self, position: &Position) -> Result<Forecast, PipelineError>;
}
