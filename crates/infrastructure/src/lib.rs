//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the Yr and InfluxDB
//! integrations, and owns configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, SchedulerConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_tracing};
