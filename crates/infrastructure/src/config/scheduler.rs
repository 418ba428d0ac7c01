//! Poll scheduling configuration.

use std::time::Duration;

use application::services::{DEFAULT_HORIZON, FailurePolicyKind};
use serde::Deserialize;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between poll cycles
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Number of leading forecast samples written per cycle
    #[serde(default = "default_horizon")]
    pub horizon: usize,

    /// What to do when a cycle fails
    #[serde(default)]
    pub failure_policy: FailurePolicyKind,
}

const fn default_interval() -> u64 {
    3600
}

const fn default_horizon() -> usize {
    DEFAULT_HORIZON
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            horizon: default_horizon(),
            failure_policy: FailurePolicyKind::default(),
        }
    }
}

impl SchedulerConfig {
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
