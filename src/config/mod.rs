//! Configuration module for flexboard
//!
//! Provides layered configuration loading from files, environment variables,
//! and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`FLEXBOARD_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use flexboard::config::ConsoleConfig;
//!
//! // Load defaults
//! let config = ConsoleConfig::default();
//! assert_eq!(config.scheduler.base_url, "http://127.0.0.1:8192");
//!
//! // Parse from TOML
//! let toml = r#"
//! [scheduler]
//! base_url = "http://scheduler:8192"
//! "#;
//! let config: ConsoleConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.scheduler.base_url, "http://scheduler:8192");
//! ```

pub mod error;
pub mod logging;
pub mod scheduler;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use scheduler::SchedulerConfig;

// Re-export PollConfig from the poller module
pub use crate::poller::PollConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Scheduler endpoint settings
    pub scheduler: SchedulerConfig,
    /// Background polling cadences
    pub poll: PollConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports FLEXBOARD_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("FLEXBOARD_SCHEDULER_URL") {
            self.scheduler.base_url = url;
        }
        if let Ok(timeout) = std::env::var("FLEXBOARD_REQUEST_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.scheduler.request_timeout_seconds = t;
            }
        }

        if let Ok(level) = std::env::var("FLEXBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FLEXBOARD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(poll) = std::env::var("FLEXBOARD_POLL") {
            self.poll.enabled = poll.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "scheduler.base_url".to_string(),
                message: "base URL cannot be empty".to_string(),
            });
        }
        if !self.scheduler.base_url.starts_with("http://")
            && !self.scheduler.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation {
                field: "scheduler.base_url".to_string(),
                message: "base URL must start with http:// or https://".to_string(),
            });
        }
        if self.scheduler.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "scheduler.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.poll.config_interval_seconds == 0 || self.poll.tasks_interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "poll".to_string(),
                message: "poll intervals must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
