//! Background polling of remote scheduler state.
//!
//! Keeps the shared state store converged with remote truth. Each resource
//! (cluster config, task snapshot) runs its own loop: one request in flight
//! at most, and the next attempt is scheduled only after the previous one
//! settles. Failures are logged and absorbed; the store keeps the last good
//! value so the console never blanks on a transient error.

mod config;

pub use config::PollConfig;

use crate::client::SchedulerClient;
use crate::model::ApiDescription;
use crate::store::StateStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Drives periodic refresh of the config and task entities.
pub struct Poller {
    client: Arc<SchedulerClient>,
    store: Arc<StateStore>,
    config: PollConfig,
}

/// Handle returned by [`Poller::start`].
///
/// Dropping the handle leaves the loops running; call [`shutdown`] to stop
/// scheduling further polls and wait for the in-flight ones to settle.
///
/// [`shutdown`]: PollerHandle::shutdown
pub struct PollerHandle {
    cancel: CancellationToken,
    config_task: JoinHandle<()>,
    tasks_task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop both poll loops and wait for them to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.config_task.await;
        let _ = self.tasks_task.await;
    }
}

impl Poller {
    pub fn new(client: Arc<SchedulerClient>, store: Arc<StateStore>, config: PollConfig) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    /// Fetch the API description once; on failure the store keeps its
    /// placeholder and startup continues.
    pub async fn load_api_description(&self) {
        match self.client.fetch_api_description().await {
            Ok(document) => {
                self.store.set_api_description(ApiDescription::Loaded(document));
                tracing::info!("API description loaded");
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to load API description, keeping placeholder");
            }
        }
    }

    /// Run a single config poll attempt. Returns whether it succeeded.
    pub async fn poll_config_once(&self) -> bool {
        match self.client.fetch_config().await {
            Ok(config) => {
                self.store.set_config(config);
                true
            }
            Err(error) => {
                tracing::warn!(%error, "Config poll failed, keeping previous config");
                false
            }
        }
    }

    /// Run a single task-snapshot poll attempt. Returns whether it succeeded.
    pub async fn poll_tasks_once(&self) -> bool {
        match self.client.fetch_tasks().await {
            Ok(tasks) => {
                tracing::debug!(total = tasks.total(), "Task snapshot refreshed");
                self.store.set_tasks(tasks);
                true
            }
            Err(error) => {
                tracing::warn!(%error, "Task poll failed, keeping previous snapshot");
                false
            }
        }
    }

    /// Start both poll loops.
    ///
    /// Each loop polls immediately, then sleeps its interval after every
    /// attempt settles, so requests for the same resource never overlap.
    pub fn start(self, cancel: CancellationToken) -> PollerHandle {
        let poller = Arc::new(self);

        tracing::info!(
            config_interval_seconds = poller.config.config_interval_seconds,
            tasks_interval_seconds = poller.config.tasks_interval_seconds,
            "Poller started"
        );

        let config_task = {
            let poller = Arc::clone(&poller);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let interval = Duration::from_secs(poller.config.config_interval_seconds);
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = poller.poll_config_once() => {}
                    }
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(interval) => {}
                    }
                }
                tracing::debug!("Config poll loop stopped");
            })
        };

        let tasks_task = {
            let poller = Arc::clone(&poller);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let interval = Duration::from_secs(poller.config.tasks_interval_seconds);
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = poller.poll_tasks_once() => {}
                    }
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(interval) => {}
                    }
                }
                tracing::debug!("Task poll loop stopped");
            })
        };

        PollerHandle {
            cancel,
            config_task,
            tasks_task,
        }
    }
}
