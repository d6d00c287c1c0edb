//! View rendering.
//!
//! Pure projections: each function takes an immutable state snapshot and
//! returns the rendered surface as a string. Nothing here mutates state or
//! talks to the network.

use super::gate::Command;
use super::route::Route;
use crate::model::{ApiDescription, ShutdownMode};
use crate::store::StateSnapshot;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Select and render exactly one view for the active route.
pub fn render(route: Route, snapshot: &StateSnapshot, pending: Option<&Command>) -> String {
    match route {
        Route::About => render_about(snapshot),
        Route::Flex => render_flex(snapshot, pending),
        Route::Tasks => render_tasks(snapshot),
        Route::Config => render_config(snapshot),
        Route::Help => render_help(),
        Route::Shutdown(mode) => render_shutdown(mode, pending),
    }
}

/// "activeTasks" -> "Active Tasks"
fn pretty_group_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

fn render_about(snapshot: &StateSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "About".bold()));
    out.push_str(
        "flexboard is an operator console for a resource-scheduling framework. \
         It keeps a continuously polled view of cluster task state and lets you \
         flex worker pools and shut the framework down.\n\n",
    );
    out.push_str(&format!(
        "Scheduler master: {}\n\n",
        snapshot.config.master_address.cyan()
    ));
    out.push_str(&format!("{}\n", "API".bold()));
    match &snapshot.api {
        ApiDescription::Loaded(document) => {
            let pretty = serde_json::to_string_pretty(document)
                .unwrap_or_else(|_| "<unprintable document>".to_string());
            out.push_str(&pretty);
            out.push('\n');
        }
        ApiDescription::Unavailable(message) => {
            out.push_str(&format!("{}\n", message.yellow()));
        }
    }
    out
}

fn render_flex(snapshot: &StateSnapshot, pending: Option<&Command>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Profile", "CPU", "Memory"]);

    for (name, profile) in &snapshot.config.profiles {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(profile.cpu),
            Cell::new(profile.mem),
        ]);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", "Flex".bold()));
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(
        "Stage a command with: flexup <profile> <instances> | flexdown <profile> <instances>\n",
    );
    out.push_str(&render_pending(pending));
    out
}

fn render_tasks(snapshot: &StateSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Tasks".bold()));

    // Groups are rendered sorted by group key, input order kept per group
    for (key, tasks) in snapshot.tasks.groups() {
        let heading = pretty_group_name(key);
        out.push_str(&format!("{} ({})\n", heading.bold(), tasks.len()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Task"]);
        for task in tasks {
            table.add_row(vec![Cell::new(task)]);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }

    if let Some(at) = snapshot.tasks_refreshed_at {
        out.push_str(&format!("Last refreshed: {}\n", at.to_rfc3339()));
    } else {
        out.push_str(&format!("{}\n", "No task snapshot fetched yet".yellow()));
    }
    out
}

fn render_config(snapshot: &StateSnapshot) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Profile", "CPU", "Memory"]);

    for (name, profile) in &snapshot.config.profiles {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(profile.cpu),
            Cell::new(profile.mem),
        ]);
    }

    let raw = serde_json::to_string_pretty(&snapshot.config)
        .unwrap_or_else(|_| "<unprintable config>".to_string());

    let mut out = String::new();
    out.push_str(&format!("{}\n", "Config".bold()));
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&format!("{}\n{}\n", "Raw document".bold(), raw));
    out
}

fn render_help() -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Help".bold()));
    out.push_str("Navigation:\n");
    out.push_str("  go /tasks | /flex | /config | /about | /help\n");
    out.push_str("  go /shutdown/rm | /shutdown/framework | /shutdown/abort\n\n");
    out.push_str("Commands:\n");
    out.push_str("  flexup <profile> <instances>    stage a flex-up command\n");
    out.push_str("  flexdown <profile> <instances>  stage a flex-down command\n");
    out.push_str("  y                               confirm the pending command\n");
    out.push_str("  n                               cancel the pending command\n");
    out.push_str("  quit                            leave the console\n\n");
    out.push_str("The tasks view shows running task states; the flex view stands\n");
    out.push_str("worker instances up or down; the config view shows the scheduler\n");
    out.push_str("configuration. Mutating commands always require confirmation.\n");
    out
}

fn render_shutdown(mode: ShutdownMode, pending: Option<&Command>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("Shutdown framework ({})?", mode).bold().red()
    ));
    out.push_str(&format!("{}\n", mode.describe()));
    out.push_str(&render_pending(pending));
    out
}

fn render_pending(pending: Option<&Command>) -> String {
    match pending {
        Some(command) => format!(
            "\n{} {}\nConfirm with 'y', cancel with 'n'.\n",
            "Pending:".bold().yellow(),
            command
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskSnapshot;
    use crate::store::StateStore;

    fn snapshot_with_tasks(tasks: TaskSnapshot) -> StateSnapshot {
        let store = StateStore::new();
        store.set_tasks(tasks);
        store.snapshot()
    }

    #[test]
    fn test_tasks_view_renders_four_groups_sorted() {
        let snapshot = snapshot_with_tasks(TaskSnapshot {
            pending_tasks: vec![],
            staging_tasks: vec!["s1".into()],
            active_tasks: vec!["a1".into(), "a2".into()],
            killable_tasks: vec![],
        });

        let output = render_tasks(&snapshot);

        let active = output.find("Active Tasks").unwrap();
        let killable = output.find("Killable Tasks").unwrap();
        let pending = output.find("Pending Tasks").unwrap();
        let staging = output.find("Staging Tasks").unwrap();
        assert!(active < killable && killable < pending && pending < staging);

        assert!(output.contains("(2)"));
        assert!(output.contains("s1"));
        // Input order within a group is preserved
        assert!(output.find("a1").unwrap() < output.find("a2").unwrap());
    }

    #[test]
    fn test_about_view_renders_offline_bootstrap() {
        // Initial mount, no network: bootstrap config and the placeholder
        let store = StateStore::new();
        let output = render(Route::About, &store.snapshot(), None);

        assert!(output.contains("127.0.0.1:5050"));
        assert!(output.contains("application.wadl not defined."));
    }

    #[test]
    fn test_flex_view_lists_bootstrap_profiles() {
        let store = StateStore::new();
        let output = render(Route::Flex, &store.snapshot(), None);

        assert!(output.contains("small"));
        assert!(output.contains("medium"));
        assert!(output.contains("large"));
    }

    #[test]
    fn test_shutdown_view_shows_pending_command() {
        let store = StateStore::new();
        let pending = Command::Shutdown {
            mode: ShutdownMode::FrameworkGraceful,
        };
        let output = render(
            Route::Shutdown(ShutdownMode::FrameworkGraceful),
            &store.snapshot(),
            Some(&pending),
        );

        assert!(output.contains("failover mode"));
        assert!(output.contains("Confirm with 'y'"));
    }

    #[test]
    fn test_about_view_renders_loaded_document() {
        let store = StateStore::new();
        store.set_api_description(crate::model::ApiDescription::Loaded(serde_json::json!({
            "application": {"resources": {"@base": "/api/"}}
        })));

        let output = render(Route::About, &store.snapshot(), None);
        assert!(output.contains("resources"));
        assert!(!output.contains("application.wadl not defined."));
    }

    #[test]
    fn test_pretty_group_name() {
        assert_eq!(pretty_group_name("activeTasks"), "Active Tasks");
        assert_eq!(pretty_group_name("pendingTasks"), "Pending Tasks");
    }
}
