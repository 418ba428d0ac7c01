//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod influx_sink_adapter;
mod yr_forecast_adapter;

pub use influx_sink_adapter::InfluxSinkAdapter;
pub use yr_forecast_adapter::YrForecastAdapter;
