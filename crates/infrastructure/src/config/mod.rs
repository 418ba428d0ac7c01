//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP listener and shutdown settings
//! - `scheduler`: poll interval, horizon and failure policy
//!
//! Sources are layered: built-in defaults, then an optional `config.toml`
//! in the working directory, then `FORECAST_*` environment variables.
//! Nested keys use a double underscore, e.g. `FORECAST_INFLUX__TOKEN`.

mod scheduler;
mod server;

use ::config::{Environment, File, FileFormat, Map, Source};
use domain::Position;
use integration_influx::InfluxConfig;
use integration_yr::YrConfig;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

pub use scheduler::SchedulerConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FORECAST";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value was read but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Position forecasts are requested for
    pub position: Position,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub yr: YrConfig,

    pub influx: InfluxConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            File::with_name("config").required(false),
            environment(),
        )
    }

    /// Parse a TOML document, ignoring the process environment
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::load_from(
            File::from_str(toml, FileFormat::Toml),
            environment().source(Some(Map::new())),
        )
    }

    fn load_from<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let config: Self = ::config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "scheduler.interval_secs must be greater than zero".into(),
            ));
        }
        if self.scheduler.horizon == 0 {
            return Err(ConfigError::Invalid(
                "scheduler.horizon must be greater than zero".into(),
            ));
        }

        let timeouts = [
            ("server.request_timeout_secs", self.server.request_timeout_secs),
            ("yr.timeout_secs", self.yr.timeout_secs),
            ("influx.timeout_secs", self.influx.timeout_secs),
        ];
        if let Some((key, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Invalid(format!("{key} must be greater than zero")));
        }

        let influx = [
            ("influx.url", self.influx.url.as_str()),
            ("influx.token", self.influx.token.expose_secret()),
            ("influx.org", self.influx.org.as_str()),
            ("influx.bucket", self.influx.bucket.as_str()),
        ];
        if let Some((key, _)) = influx.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("{key} must not be empty")));
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::services::FailurePolicyKind;
    use std::time::Duration;

    const MINIMAL: &str = r#"
        [position]
        latitude = 59.9133
        longitude = 10.7389
        altitude = 12.0

        [influx]
        url = "http://localhost:8086"
        token = "secret-token"
        org = "home"
        bucket = "weather"
    "#;

    fn env_source(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn minimal_document_gets_defaults() {
        let config = AppConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.position, Position::new(59.9133, 10.7389, 12.0));
        assert_eq!(config.scheduler.interval(), Duration::from_secs(3600));
        assert_eq!(config.scheduler.horizon, 24);
        assert_eq!(config.scheduler.failure_policy, FailurePolicyKind::FailFast);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.yr, YrConfig::default());
        assert_eq!(config.influx.timeout_secs, 10);
        assert_eq!(config.influx.token.expose_secret(), "secret-token");
    }

    #[test]
    fn explicit_sections_override_defaults() {
        let toml = format!(
            r#"{MINIMAL}
            [scheduler]
            interval_secs = 600
            horizon = 12
            failure_policy = "continue"

            [yr]
            user_agent = "me@example.com"
            "#
        );
        let config = AppConfig::from_toml_str(&toml).unwrap();

        assert_eq!(config.scheduler.interval_secs, 600);
        assert_eq!(config.scheduler.horizon, 12);
        assert_eq!(config.scheduler.failure_policy, FailurePolicyKind::Continue);
        assert_eq!(config.yr.user_agent, "me@example.com");
        assert_eq!(config.yr.base_url, YrConfig::default().base_url);
    }

    #[test]
    fn environment_overrides_file() {
        let config = AppConfig::load_from(
            File::from_str(MINIMAL, FileFormat::Toml),
            env_source(&[
                ("FORECAST_SCHEDULER__INTERVAL_SECS", "60"),
                ("FORECAST_INFLUX__BUCKET", "other"),
                ("UNRELATED_VAR", "ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(config.scheduler.interval_secs, 60);
        assert_eq!(config.influx.bucket, "other");
    }

    #[test]
    fn missing_position_is_rejected() {
        let toml = r#"
            [influx]
            url = "http://localhost:8086"
            token = "t"
            org = "o"
            bucket = "b"
        "#;
        assert!(matches!(
            AppConfig::from_toml_str(toml),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let toml = format!("{MINIMAL}\n[scheduler]\ninterval_secs = 0\n");
        let err = AppConfig::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let toml = format!("{MINIMAL}\n[scheduler]\nhorizon = 0\n");
        let err = AppConfig::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("horizon"));
    }

    #[test]
    fn empty_influx_field_is_rejected() {
        let toml = MINIMAL.replace(r#"org = "home""#, r#"org = """#);
        let err = AppConfig::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("influx.org")));
    }

    #[test]
    fn zero_client_timeouts_are_rejected() {
        for (var, key) in [
            ("FORECAST_YR__TIMEOUT_SECS", "yr.timeout_secs"),
            ("FORECAST_INFLUX__TIMEOUT_SECS", "influx.timeout_secs"),
        ] {
            let err = AppConfig::load_from(
                File::from_str(MINIMAL, FileFormat::Toml),
                env_source(&[(var, "0")]),
            )
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains(key)));
        }
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        let toml = format!("{MINIMAL}\n[server]\nrequest_timeout_secs = 0\n");
        let err = AppConfig::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("server.request_timeout_secs"));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = AppConfig::from_toml_str(MINIMAL).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
    }
}
