//! Forecast ingest HTTP presentation layer
//!
//! Health and manual-run endpoints, plus the task supervisor the
//! `forecast-server` binary runs the scheduler and listener under.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use routes::{create_app, create_router};
pub use state::AppState;
pub use tasks::{TaskError, TaskSupervisor};
