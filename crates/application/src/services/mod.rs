//! Application services - Use case implementations

mod forecast_pipeline;
mod pipeline_status;
mod polling_scheduler;
mod timeseries_writer;

pub use forecast_pipeline::ForecastPipeline;
pub use pipeline_status::{PipelineStatus, SchedulerState, StatusSnapshot};
pub use polling_scheduler::{
    ContinueOnError, FailFast, FailureAction, FailurePolicy, FailurePolicyKind, PollingScheduler,
};
pub use timeseries_writer::{
    DEFAULT_HORIZON, MEASUREMENT, TimeSeriesWriter, horizon_points, slot_field_name,
};
