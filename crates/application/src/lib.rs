//! Application layer - Use cases and orchestration
//!
//! Contains the forecast pipeline (fetch, transform, write), the polling
//! scheduler that drives it, and the ports the infrastructure layer
//! implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{PipelineError, SchedulerError};
pub use ports::*;
pub use services::*;
