//! Met.no locationforecast client
//!
//! HTTP client for the `complete` forecast product.

use std::{sync::Arc, time::Duration};

use domain::{Forecast, Position};
use reqwest::{
    Client, Method, Request, StatusCode, Url,
    header::{HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    observer::{RequestObserver, TracingRequestObserver},
    transport::HttpTransport,
};

/// Yr client errors
#[derive(Debug, Error)]
pub enum YrError {
    /// No response was obtained from the service
    #[error("Transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a status other than 200
    #[error("Unexpected status: {status}")]
    Status { status: u16 },

    /// The response body is not a valid forecast document
    #[error("Failed to decode forecast: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured base URL cannot be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The configured user agent is not a valid header value
    #[error("Invalid user agent: {0}")]
    InvalidUserAgent(String),

    /// The HTTP client could not be built
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

/// Yr service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YrConfig {
    /// Locationforecast base URL (default: <https://api.met.no/weatherapi/locationforecast/2.0>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Identifying `User-Agent` sent with every request (required by Met.no terms)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0".to_string()
}

fn default_user_agent() -> String {
    concat!("forecast-ingest/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for YrConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Result of a request that produced a response
///
/// A non-200 status is a value here rather than an error; callers decide
/// whether it is fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 200 OK with the decoded body
    Forecast(Forecast),
    /// Any other status; the body was drained but not decoded
    Status(StatusCode),
}

/// Locationforecast HTTP client
#[derive(Debug)]
pub struct YrClient {
    transport: Arc<dyn HttpTransport>,
    observer: Arc<dyn RequestObserver>,
    config: YrConfig,
    user_agent: HeaderValue,
}

impl YrClient {
    /// Create a client backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized or the
    /// configured user agent is not a valid header value.
    pub fn new(config: YrConfig) -> Result<Self, YrError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| YrError::ClientInit(e.to_string()))?;

        Self::with_transport(config, Arc::new(client))
    }

    /// Create a client that sends requests through `transport`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured user agent is not a valid header value.
    pub fn with_transport(
        config: YrConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, YrError> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| YrError::InvalidUserAgent(config.user_agent.clone()))?;

        Ok(Self {
            transport,
            observer: Arc::new(TracingRequestObserver),
            config,
            user_agent,
        })
    }

    /// Replace the request observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &YrConfig {
        &self.config
    }

    /// Build the `complete` URL for a position
    ///
    /// Latitude and longitude use four decimals, altitude is rounded to
    /// whole meters.
    pub fn complete_url(&self, position: &Position) -> Result<Url, YrError> {
        let base = self.config.base_url.trim_end_matches('/');
        let lat = format!("{:.4}", position.latitude());
        let lon = format!("{:.4}", position.longitude());
        let altitude = format!("{:.0}", position.altitude());

        Url::parse_with_params(
            &format!("{base}/complete"),
            &[("lat", lat), ("lon", lon), ("altitude", altitude)],
        )
        .map_err(|e| YrError::InvalidUrl(format!("{base}: {e}")))
    }

    /// Issue one request for the `complete` product
    ///
    /// The response body is read to the end on every path so the transport
    /// can reuse the connection.
    #[instrument(skip(self), fields(position = %position))]
    pub async fn fetch_complete(&self, position: &Position) -> Result<FetchOutcome, YrError> {
        let url = self.complete_url(position)?;

        let mut request = Request::new(Method::GET, url.clone());
        request
            .headers_mut()
            .insert(USER_AGENT, self.user_agent.clone());

        self.observer.request_issued(&url);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(YrError::Transport)?;

        let status = response.status();
        self.observer.response_received(&url, status);

        if status != StatusCode::OK {
            if let Err(e) = response.bytes().await {
                debug!(error = %e, "Failed to drain response body");
            }
            return Ok(FetchOutcome::Status(status));
        }

        let body = response.bytes().await.map_err(YrError::Transport)?;
        let forecast = decode_forecast(&body).map_err(YrError::Decode)?;

        Ok(FetchOutcome::Forecast(forecast))
    }

    /// Fetch and decode the forecast, treating any non-200 status as an error
    pub async fn get_complete_forecast(&self, position: &Position) -> Result<Forecast, YrError> {
        match self.fetch_complete(position).await? {
            FetchOutcome::Forecast(forecast) => Ok(forecast),
            FetchOutcome::Status(status) => Err(YrError::Status {
                status: status.as_u16(),
            }),
        }
    }
}

/// Decode the first JSON document in `body`
///
/// An empty body or a `null` document yields the zero-value forecast;
/// anything after the first complete document is ignored.
fn decode_forecast(body: &[u8]) -> Result<Forecast, serde_json::Error> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<Forecast>>()
        .next()
        .transpose()
        .map(Option::flatten)
        .map(Option::unwrap_or_default)
}
