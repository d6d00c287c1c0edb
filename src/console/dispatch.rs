//! Dispatch of confirmed commands.
//!
//! Translates a confirmed [`Command`] into a client call and returns the
//! post-action route immediately. The call itself runs in the background:
//! its outcome is logged, never surfaced synchronously. The operator sees
//! the actual effect on the next task-snapshot poll.

use super::gate::Command;
use super::route::Route;
use crate::client::{Ack, ClientError, SchedulerClient};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Issues mutating commands and performs the fixed post-dispatch navigation.
pub struct ActionDispatcher {
    client: Arc<SchedulerClient>,
    cancel: CancellationToken,
}

impl ActionDispatcher {
    /// In-flight dispatches are abandoned when `cancel` fires at teardown.
    pub fn new(client: Arc<SchedulerClient>, cancel: CancellationToken) -> Self {
        Self { client, cancel }
    }

    /// Dispatch a confirmed command.
    ///
    /// Spawns the network call and returns [`Route::Tasks`] immediately,
    /// whether or not the call will succeed.
    pub fn dispatch(&self, command: Command) -> Route {
        tracing::info!(%command, "Dispatching command");

        let client = Arc::clone(&self.client);
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(%command, "Dispatch abandoned during teardown");
                }
                result = run_command(&client, &command) => match result {
                    Ok(ack) => {
                        tracing::info!(%command, status = ack.status, "Command accepted");
                    }
                    Err(error) => {
                        tracing::warn!(%command, %error, "Command failed");
                    }
                }
            }
        });

        Route::Tasks
    }
}

async fn run_command(client: &SchedulerClient, command: &Command) -> Result<Ack, ClientError> {
    match command {
        Command::FlexUp { profile, instances } => client.flex_up(profile, *instances).await,
        Command::FlexDown { profile, instances } => client.flex_down(profile, *instances).await,
        Command::Shutdown { mode } => client.shutdown(*mode).await,
    }
}
