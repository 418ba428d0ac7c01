//! In-memory pipeline status
//!
//! Summarizes recent cycles for the readiness endpoint. Nothing here is
//! persisted.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// Lifecycle state of the polling scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    /// The scheduler has not started yet
    #[default]
    Starting,
    /// Cycles are being scheduled
    Running,
    /// Stopped after a shutdown request
    Stopped,
    /// Stopped because a cycle failed
    Halted,
}

/// Point-in-time copy of the pipeline status
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusSnapshot {
    pub scheduler: SchedulerState,
    pub cycles_succeeded: u64,
    pub cycles_failed: u64,
    pub last_points_written: usize,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// Shared, lock-protected pipeline status
#[derive(Debug, Default)]
pub struct PipelineStatus {
    inner: RwLock<StatusSnapshot>,
}

impl PipelineStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, points_written: usize) {
        let mut inner = self.inner.write();
        inner.cycles_succeeded += 1;
        inner.last_points_written = points_written;
        inner.last_success = Some(Utc::now());
    }

    pub fn record_failure(&self, error: &impl std::fmt::Display) {
        let mut inner = self.inner.write();
        inner.cycles_failed += 1;
        inner.last_failure = Some(Utc::now());
        inner.last_error = Some(error.to_string());
    }

    pub fn set_scheduler_state(&self, state: SchedulerState) {
        self.inner.write().scheduler = state;
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.inner.read().scheduler
    }

    /// Ready while the scheduler is actively polling
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.scheduler_state() == SchedulerState::Running
    }

    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        self.inner.read().clone()
    }
}
