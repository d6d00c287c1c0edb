//! Shared state store.
//!
//! Owned by the console root and injected into the poller and the views,
//! never looked up globally. The poller is the only writer for config and
//! tasks; the API description is written once at startup. Views consume
//! immutable snapshots.

use crate::model::{ApiDescription, ClusterConfig, TaskSnapshot};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct Shared {
    config: ClusterConfig,
    tasks: TaskSnapshot,
    api: ApiDescription,
    config_refreshed_at: Option<DateTime<Utc>>,
    tasks_refreshed_at: Option<DateTime<Utc>>,
}

/// Immutable copy of the store contents handed to views.
///
/// `version` increases monotonically with every store mutation, so a view
/// can tell whether anything changed since the snapshot it last rendered.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub version: u64,
    pub config: ClusterConfig,
    pub tasks: TaskSnapshot,
    pub api: ApiDescription,
    /// When the config was last replaced by a successful poll
    pub config_refreshed_at: Option<DateTime<Utc>>,
    /// When the task snapshot was last replaced by a successful poll
    pub tasks_refreshed_at: Option<DateTime<Utc>>,
}

/// Thread-safe store for the three remote-backed entities.
///
/// Every setter replaces its entity wholesale; there is no partial merge.
/// A failed poll never reaches the store, so the previous value survives
/// transient errors untouched.
pub struct StateStore {
    inner: RwLock<Shared>,
    version: AtomicU64,
}

impl StateStore {
    /// Create a store seeded with the built-in bootstrap values.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Shared {
                config: ClusterConfig::bootstrap(),
                tasks: TaskSnapshot::default(),
                api: ApiDescription::placeholder(),
                config_refreshed_at: None,
                tasks_refreshed_at: None,
            }),
            version: AtomicU64::new(0),
        }
    }

    /// Replace the cluster configuration wholesale.
    pub fn set_config(&self, config: ClusterConfig) {
        let mut shared = self.inner.write().expect("state store lock poisoned");
        shared.config = config;
        shared.config_refreshed_at = Some(Utc::now());
        drop(shared);
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    /// Replace the task snapshot wholesale.
    pub fn set_tasks(&self, tasks: TaskSnapshot) {
        let mut shared = self.inner.write().expect("state store lock poisoned");
        shared.tasks = tasks;
        shared.tasks_refreshed_at = Some(Utc::now());
        drop(shared);
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    /// Set the API description (written once at startup).
    pub fn set_api_description(&self, api: ApiDescription) {
        let mut shared = self.inner.write().expect("state store lock poisoned");
        shared.api = api;
        drop(shared);
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    /// Current store version; bumped on every mutation.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Take an immutable snapshot of everything a view needs.
    pub fn snapshot(&self) -> StateSnapshot {
        let shared = self.inner.read().expect("state store lock poisoned");
        StateSnapshot {
            version: self.version.load(Ordering::SeqCst),
            config: shared.config.clone(),
            tasks: shared.tasks.clone(),
            api: shared.api.clone(),
            config_refreshed_at: shared.config_refreshed_at,
            tasks_refreshed_at: shared.tasks_refreshed_at,
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
