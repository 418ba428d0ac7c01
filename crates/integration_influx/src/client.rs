//! InfluxDB v2 write client

use std::time::Duration;

use domain::DataPoint;
use reqwest::{
    Client, Url,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::line_protocol::encode_point;

/// InfluxDB client errors
#[derive(Debug, Error)]
pub enum InfluxError {
    /// The point cannot be expressed in line protocol
    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    /// No response was obtained from the server
    #[error("Transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server refused the write
    #[error("Write rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The configured server URL cannot be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

/// InfluxDB connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InfluxConfig {
    /// Server URL, e.g. `http://localhost:8086`
    pub url: String,

    /// API token with write access to the bucket
    pub token: SecretString,

    /// Organization name
    pub org: String,

    /// Target bucket
    pub bucket: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

const fn default_timeout() -> u64 {
    10
}

impl InfluxConfig {
    /// Create a configuration with the default timeout
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        org: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            token: SecretString::from(token.into()),
            org: org.into(),
            bucket: bucket.into(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Blocking-style point writer: every call is one HTTP round trip
#[derive(Debug)]
pub struct InfluxClient {
    client: Client,
    write_url: Url,
    config: InfluxConfig,
}

impl InfluxClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be
    /// initialized.
    pub fn new(config: InfluxConfig) -> Result<Self, InfluxError> {
        let base = config.url.trim_end_matches('/');
        let write_url = Url::parse_with_params(
            &format!("{base}/api/v2/write"),
            &[
                ("org", config.org.as_str()),
                ("bucket", config.bucket.as_str()),
                ("precision", "ns"),
            ],
        )
        .map_err(|e| InfluxError::InvalidUrl(format!("{base}: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InfluxError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            write_url,
            config,
        })
    }

    /// Target bucket
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Write a single point
    #[instrument(skip(self, point), fields(measurement = point.measurement(), bucket = %self.config.bucket))]
    pub async fn write_point(&self, point: &DataPoint) -> Result<(), InfluxError> {
        let line = encode_point(point)?;
        debug!(line = %line, "Writing point");

        let response = self
            .client
            .post(self.write_url.clone())
            .header(
                AUTHORIZATION,
                format!("Token {}", self.config.token.expose_secret()),
            )
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(line)
            .send()
            .await
            .map_err(InfluxError::Transport)?;

        let status = response.status();
        // Read the body either way so the connection can be reused
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(InfluxError::Rejected {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_url_carries_org_bucket_and_precision() {
        let client = InfluxClient::new(InfluxConfig::new(
            "http://localhost:8086/",
            "secret",
            "home",
            "weather",
        ))
        .expect("client should build");

        assert_eq!(client.write_url.path(), "/api/v2/write");
        assert_eq!(
            client.write_url.query(),
            Some("org=home&bucket=weather&precision=ns")
        );
        assert_eq!(client.bucket(), "weather");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = InfluxClient::new(InfluxConfig::new("::nope", "t", "o", "b"));
        assert!(matches!(result, Err(InfluxError::InvalidUrl(_))));
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let config = InfluxConfig::new("http://localhost:8086", "super-secret", "o", "b");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_config_deserialization_defaults_timeout() {
        let config: InfluxConfig = serde_json::from_str(
            r#"{"url":"http://db:8086","token":"t","org":"o","bucket":"b"}"#,
        )
        .expect("should deserialize");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.token.expose_secret(), "t");
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(300);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
