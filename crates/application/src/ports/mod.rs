//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod forecast_port;
mod pipeline_observer;
mod point_sink_port;

#[cfg(test)]
pub use forecast_port::MockForecastPort;
pub use forecast_port::ForecastPort;
pub use pipeline_observer::{CycleTrigger, PipelineObserver, StopReason, TracingPipelineObserver};
#[cfg(test)]
pub use point_sink_port::MockPointSinkPort;
pub use point_sink_port::{PointSinkPort, SinkError};
