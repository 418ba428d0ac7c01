//! Forecast adapter - Implements ForecastPort using integration_yr

use application::{error::PipelineError, ports::ForecastPort};
use async_trait::async_trait;
use domain::{Forecast, Position};
use integration_yr::{YrClient, YrConfig, YrError};
use tracing::{debug, instrument};

/// Adapter for the Met.no locationforecast service
#[derive(Debug)]
pub struct YrForecastAdapter {
    client: YrClient,
}

impl YrForecastAdapter {
    /// Create an adapter with its own `reqwest` client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: YrConfig) -> Result<Self, PipelineError> {
        let client = YrClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration error to pipeline error
    fn map_error(err: YrError) -> PipelineError {
        match err {
            YrError::Transport(e) => PipelineError::Transport(e.to_string()),
            YrError::Status { status } => PipelineError::Status { status },
            YrError::Decode(e) => PipelineError::Decode(e.to_string()),
            YrError::InvalidUrl(_) | YrError::InvalidUserAgent(_) | YrError::ClientInit(_) => {
                PipelineError::Internal(err.to_string())
            },
        }
    }
}

#[async_trait]
impl ForecastPort for YrForecastAdapter {
    #[instrument(skip(self), fields(lat = position.latitude(), lon = position.longitude()))]
    async fn fetch_forecast(&self, position: &Position) -> Result<Forecast, PipelineError> {
        let result = self
            .client
            .get_complete_forecast(position)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => {
                debug!(samples = forecast.samples().len(), "Retrieved forecast");
            },
            Err(e) => {
                debug!(error = %e, "Failed to retrieve forecast");
            },
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_default_config_builds() {
        assert!(YrForecastAdapter::with_config(YrConfig::default()).is_ok());
    }

    #[test]
    fn invalid_user_agent_is_internal() {
        let config = YrConfig {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            YrForecastAdapter::with_config(config),
            Err(PipelineError::Internal(_))
        ));
    }

    #[test]
    fn status_keeps_code() {
        assert_eq!(
            YrForecastAdapter::map_error(YrError::Status { status: 503 }),
            PipelineError::Status { status: 503 }
        );
    }

    #[test]
    fn decode_error_is_classified() {
        let source = serde_json::from_str::<u8>("{").unwrap_err();
        assert!(matches!(
            YrForecastAdapter::map_error(YrError::Decode(source)),
            PipelineError::Decode(_)
        ));
    }

    #[test]
    fn debug_impl() {
        let adapter = YrForecastAdapter::with_config(YrConfig::default()).unwrap();
        assert!(format!("{adapter:?}").contains("YrForecastAdapter"));
    }
}
