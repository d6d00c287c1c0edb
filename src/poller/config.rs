//! Configuration for remote-state polling.

use serde::{Deserialize, Serialize};

/// Polling cadences for the two remote-backed entities.
///
/// The cadences are independent: a slow or failing config poll never delays
/// the task poll, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Whether background polling is enabled
    pub enabled: bool,
    /// Seconds between cluster-config poll attempts (delay after settle)
    pub config_interval_seconds: u64,
    /// Seconds between task-snapshot poll attempts (delay after settle)
    pub tasks_interval_seconds: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            config_interval_seconds: 2,
            tasks_interval_seconds: 2,
        }
    }
}
