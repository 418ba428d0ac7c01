//! Point sink adapter - Implements PointSinkPort using integration_influx

use application::ports::{PointSinkPort, SinkError};
use async_trait::async_trait;
use domain::DataPoint;
use integration_influx::{InfluxClient, InfluxConfig, InfluxError};
use tracing::{instrument, warn};

/// Adapter writing points to an InfluxDB v2 bucket
#[derive(Debug)]
pub struct InfluxSinkAdapter {
    client: InfluxClient,
}

impl InfluxSinkAdapter {
    /// Create an adapter for the configured bucket
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// initialize.
    pub fn with_config(config: InfluxConfig) -> Result<Self, SinkError> {
        let client = InfluxClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    fn map_error(err: InfluxError) -> SinkError {
        match err {
            InfluxError::InvalidPoint(reason) => SinkError::InvalidPoint(reason),
            InfluxError::Rejected { status, body } => {
                SinkError::Rejected(format!("status {status}: {body}"))
            },
            InfluxError::Transport(_) | InfluxError::InvalidUrl(_) | InfluxError::ClientInit(_) => {
                SinkError::Unavailable(err.to_string())
            },
        }
    }
}

#[async_trait]
impl PointSinkPort for InfluxSinkAdapter {
    #[instrument(skip_all, fields(bucket = self.client.bucket()))]
    async fn write_point(&self, point: &DataPoint) -> Result<(), SinkError> {
        self.client.write_point(point).await.map_err(|e| {
            warn!(error = %e, "Point write failed");
            Self::map_error(e)
        })
    }
}
