//! Pipeline observers
//!
//! Cycle and scheduler events are reported to an injected observer rather
//! than a global logger. The default observer forwards them to `tracing`.

use std::{fmt::Debug, time::Duration};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::PipelineError;

/// What caused a cycle to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleTrigger {
    /// The eager first cycle when the scheduler starts
    Initial,
    /// An elapsed poll interval
    Tick,
    /// An explicit request through the HTTP API
    Manual,
}

impl std::fmt::Display for CycleTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::Tick => write!(f, "tick"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Why the scheduler stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown was requested
    Cancelled,
    /// A cycle failed and the failure policy halted polling
    Failed,
}

/// Receives pipeline and scheduler events
pub trait PipelineObserver: Send + Sync + Debug {
    fn cycle_started(&self, _trigger: CycleTrigger) {}

    fn cycle_completed(&self, _trigger: CycleTrigger, _points_written: usize, _elapsed: Duration) {
    }

    fn cycle_failed(&self, _trigger: CycleTrigger, _error: &PipelineError) {}

    /// A failed cycle was tolerated by the failure policy
    fn cycle_skipped(&self, _error: &PipelineError) {}

    fn scheduler_stopped(&self, _reason: StopReason) {}
}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPipelineObserver;

impl PipelineObserver for TracingPipelineObserver {
    fn cycle_started(&self, trigger: CycleTrigger) {
        info!(trigger = %trigger, "Forecast cycle started");
    }

    fn cycle_completed(&self, trigger: CycleTrigger, points_written: usize, elapsed: Duration) {
        info!(
            trigger = %trigger,
            points = points_written,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Forecast cycle completed"
        );
    }

    fn cycle_failed(&self, trigger: CycleTrigger, err: &PipelineError) {
        error!(trigger = %trigger, error = %err, "Forecast cycle failed");
    }

    fn cycle_skipped(&self, err: &PipelineError) {
        warn!(error = %err, "Continuing after failed cycle");
    }

    fn scheduler_stopped(&self, reason: StopReason) {
        match reason {
            StopReason::Cancelled => info!("Polling scheduler stopped"),
            StopReason::Failed => error!("Polling scheduler halted after a failed cycle"),
        }
    }
}
