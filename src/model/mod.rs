//! Domain types shared across the console.
//!
//! Everything here mirrors what the scheduler's REST API serves: the cluster
//! configuration, the task snapshot, and the transcoded service description.
//! These are plain data carriers; all mutation goes through the state store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A named resource shape the scheduler uses when sizing new worker instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProfile {
    /// CPU units
    pub cpu: u32,
    /// Memory units
    pub mem: u32,
}

/// Cluster configuration as served by `GET /api/config`.
///
/// Replaced wholesale on every successful config poll; never partially merged.
/// Profile names are unique by construction (`BTreeMap` keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    /// Profile name to resource shape
    pub profiles: BTreeMap<String, ResourceProfile>,
    /// Scheduler master address (host:port)
    pub master_address: String,
    /// Port the scheduler's REST API listens on
    pub api_port: u16,
}

impl ClusterConfig {
    /// Built-in placeholder shown before the first successful config poll.
    pub fn bootstrap() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("small".to_string(), ResourceProfile { cpu: 1, mem: 1 });
        profiles.insert("medium".to_string(), ResourceProfile { cpu: 2, mem: 2 });
        profiles.insert("large".to_string(), ResourceProfile { cpu: 3, mem: 3 });
        Self {
            profiles,
            master_address: "127.0.0.1:5050".to_string(),
            api_port: 8192,
        }
    }
}

/// Task snapshot as served by `GET /api/state`.
///
/// Group membership is exhaustive and mutually exclusive from the server's
/// point of view; the console trusts the server and renders what it gets.
/// Retained unchanged when a poll attempt fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSnapshot {
    pub pending_tasks: Vec<String>,
    pub staging_tasks: Vec<String>,
    pub active_tasks: Vec<String>,
    pub killable_tasks: Vec<String>,
}

impl TaskSnapshot {
    /// Task groups keyed by wire name, ordered by group key.
    ///
    /// Input order within each group is preserved.
    pub fn groups(&self) -> BTreeMap<&'static str, &[String]> {
        let mut groups: BTreeMap<&'static str, &[String]> = BTreeMap::new();
        groups.insert("activeTasks", &self.active_tasks);
        groups.insert("killableTasks", &self.killable_tasks);
        groups.insert("pendingTasks", &self.pending_tasks);
        groups.insert("stagingTasks", &self.staging_tasks);
        groups
    }

    /// Total task count across all four groups.
    pub fn total(&self) -> usize {
        self.pending_tasks.len()
            + self.staging_tasks.len()
            + self.active_tasks.len()
            + self.killable_tasks.len()
    }
}

/// The scheduler's REST surface description, transcoded from WADL XML.
///
/// Fetched once at startup and never re-polled. A fetch or transcode failure
/// leaves the placeholder message in place rather than failing startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiDescription {
    /// Successfully fetched and transcoded
    Loaded(serde_json::Value),
    /// Not (yet) available; carries a human-readable message
    Unavailable(String),
}

impl ApiDescription {
    /// Placeholder used before the description has been fetched.
    pub fn placeholder() -> Self {
        ApiDescription::Unavailable("application.wadl not defined.".to_string())
    }
}

/// Framework shutdown variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShutdownMode {
    /// Stop only the resource-manager component
    RmOnly,
    /// Stop the driver in failover mode; the resource manager keeps running
    FrameworkGraceful,
    /// Stop everything without requiring HA re-registration
    FrameworkAbort,
}

impl ShutdownMode {
    /// Path segment under `/api/framework/shutdown/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ShutdownMode::RmOnly => "rm",
            ShutdownMode::FrameworkGraceful => "framework",
            ShutdownMode::FrameworkAbort => "abort",
        }
    }

    /// Operator-facing description shown in the confirmation prompt.
    pub fn describe(&self) -> &'static str {
        match self {
            ShutdownMode::RmOnly => {
                "This will stop the resource-manager component only. \
                 The framework driver and running tasks are left untouched."
            }
            ShutdownMode::FrameworkGraceful => {
                "This will stop the driver in failover mode, which will stop the \
                 executor and tasks, but not stop the ResourceManager."
            }
            ShutdownMode::FrameworkAbort => {
                "This will stop everything without requiring HA re-registration. \
                 All components go down."
            }
        }
    }
}

impl fmt::Display for ShutdownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShutdownMode::RmOnly => "rm-only",
            ShutdownMode::FrameworkGraceful => "framework-graceful",
            ShutdownMode::FrameworkAbort => "framework-abort",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ShutdownMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rm" | "rm-only" => Ok(ShutdownMode::RmOnly),
            "framework" | "framework-graceful" | "graceful" => Ok(ShutdownMode::FrameworkGraceful),
            "abort" | "framework-abort" => Ok(ShutdownMode::FrameworkAbort),
            _ => Err(format!("Invalid shutdown mode: {}", s)),
        }
    }
}
