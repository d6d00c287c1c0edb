//! Scheduler endpoint configuration

use serde::{Deserialize, Serialize};

/// Where the scheduler's REST API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Base URL of the scheduler service
    pub base_url: String,
    /// Per-call timeout; a timed-out call counts as a failed attempt
    pub request_timeout_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8192".to_string(),
            request_timeout_seconds: 5,
        }
    }
}
