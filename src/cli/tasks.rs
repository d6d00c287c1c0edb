//! One-shot task snapshot command

use crate::cli::TasksArgs;
use crate::client::SchedulerClient;
use crate::console::{views, Route};
use crate::store::StateStore;

/// Fetch the current task snapshot and format it for display.
pub async fn handle_tasks(args: &TasksArgs, client: &SchedulerClient) -> anyhow::Result<String> {
    let tasks = client.fetch_tasks().await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&tasks)?);
    }

    let store = StateStore::new();
    store.set_tasks(tasks);
    Ok(views::render(Route::Tasks, &store.snapshot(), None))
}
