//! Polling scheduler
//!
//! Drives the forecast pipeline at a fixed interval from a single control
//! loop: one cycle immediately, then one per elapsed interval, until the
//! shutdown token is cancelled or the failure policy halts polling.

use std::{fmt::Debug, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::{ForecastPipeline, SchedulerState};
use crate::{
    error::{PipelineError, SchedulerError},
    ports::{CycleTrigger, StopReason},
};

/// What to do after a failed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Stop polling and return the error
    Halt,
    /// Keep polling at the next tick
    Continue,
}

/// Strategy deciding how the scheduler reacts to a failed cycle
pub trait FailurePolicy: Send + Sync + Debug {
    fn on_failure(&self, error: &PipelineError) -> FailureAction;
}

/// Halt on the first failed cycle
#[derive(Debug, Default, Clone, Copy)]
pub struct FailFast;

impl FailurePolicy for FailFast {
    fn on_failure(&self, _error: &PipelineError) -> FailureAction {
        FailureAction::Halt
    }
}

/// Log failed cycles and keep polling
#[derive(Debug, Default, Clone, Copy)]
pub struct ContinueOnError;

impl FailurePolicy for ContinueOnError {
    fn on_failure(&self, _error: &PipelineError) -> FailureAction {
        FailureAction::Continue
    }
}

/// Configurable selection of the built-in failure policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicyKind {
    #[default]
    FailFast,
    Continue,
}

impl FailurePolicyKind {
    #[must_use]
    pub fn into_policy(self) -> Arc<dyn FailurePolicy> {
        match self {
            Self::FailFast => Arc::new(FailFast),
            Self::Continue => Arc::new(ContinueOnError),
        }
    }
}

/// Fixed-interval scheduler for the forecast pipeline
#[derive(Debug)]
pub struct PollingScheduler {
    pipeline: Arc<ForecastPipeline>,
    interval: Duration,
    policy: Arc<dyn FailurePolicy>,
}

impl PollingScheduler {
    /// Create a fail-fast scheduler
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidInterval` if `interval` is zero.
    pub fn new(pipeline: Arc<ForecastPipeline>, interval: Duration) -> Result<Self, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidInterval);
        }

        Ok(Self {
            pipeline,
            interval,
            policy: Arc::new(FailFast),
        })
    }

    /// Replace the failure policy
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn FailurePolicy>) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until `shutdown` is cancelled or a cycle failure halts polling
    ///
    /// Returns `Ok(())` when stopped by cancellation, including cancellation
    /// while a cycle is in flight.
    #[instrument(skip_all, fields(interval_secs = self.interval.as_secs()))]
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), SchedulerError> {
        let status = self.pipeline.status();
        status.set_scheduler_state(SchedulerState::Running);

        let result = self.poll(&shutdown).await;

        let (state, reason) = match &result {
            Ok(()) => (SchedulerState::Stopped, StopReason::Cancelled),
            Err(_) => (SchedulerState::Halted, StopReason::Failed),
        };
        status.set_scheduler_state(state);
        self.pipeline.observer().scheduler_stopped(reason);

        result
    }

    async fn poll(&self, shutdown: &CancellationToken) -> Result<(), SchedulerError> {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut trigger = CycleTrigger::Initial;
        loop {
            let outcome = tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    debug!(trigger = %trigger, "Shutdown requested during cycle");
                    return Ok(());
                }
                outcome = self.pipeline.run_cycle(trigger) => outcome,
            };

            if let Err(err) = outcome {
                match self.policy.on_failure(&err) {
                    FailureAction::Halt => return Err(SchedulerError::Cycle(err)),
                    FailureAction::Continue => self.pipeline.observer().cycle_skipped(&err),
                }
            }

            tokio::select! {
                biased;
                () = shutdown.cancelled() => return Ok(()),
                _ = ticker.tick() => {}
            }
            trigger = CycleTrigger::Tick;
        }
    }
}
