//! CLI module for flexboard
//!
//! Command-line interface definitions and handlers for the operator console.
//!
//! # Commands
//!
//! - `console` - Run the interactive console (polling + views)
//! - `tasks` - One-shot task snapshot
//! - `api` - One-shot API description fetch
//! - `flexup` / `flexdown` - Flex a worker pool up or down
//! - `shutdown` - Shut the framework down
//! - `config` - Configuration utilities (init, show)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Interactive console against the default scheduler
//! flexboard console
//!
//! # Deep-link straight into the tasks view
//! flexboard console --route /tasks
//!
//! # Scripted flex-up without the interactive prompt
//! flexboard flexup medium 5 --yes
//! ```

pub mod actions;
pub mod api;
pub mod completions;
pub mod config;
pub mod console;
pub mod tasks;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::model::ShutdownMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// flexboard - operator console for a resource-scheduling framework
#[derive(Parser, Debug)]
#[command(
    name = "flexboard",
    version,
    about = "Monitor cluster tasks and flex worker pools from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive console
    Console(ConsoleArgs),
    /// Fetch and show the current task snapshot
    Tasks(TasksArgs),
    /// Fetch and show the scheduler's API description
    Api(ApiArgs),
    /// Flex a worker pool up
    Flexup(FlexArgs),
    /// Flex a worker pool down
    Flexdown(FlexArgs),
    /// Shut the framework down
    Shutdown(ShutdownArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ConsoleArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "flexboard.toml")]
    pub config: PathBuf,

    /// Override the scheduler base URL
    #[arg(short = 'u', long, env = "FLEXBOARD_SCHEDULER_URL")]
    pub scheduler_url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FLEXBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Initial route to open (e.g. /tasks)
    #[arg(short, long)]
    pub route: Option<String>,

    /// Disable background polling
    #[arg(long)]
    pub no_poll: bool,
}

#[derive(Args, Debug)]
pub struct TasksArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "flexboard.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ApiArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "flexboard.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct FlexArgs {
    /// Resource profile name
    pub profile: String,

    /// Number of worker instances
    pub instances: u32,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "flexboard.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ShutdownArgs {
    /// Shutdown variant: rm-only, framework-graceful, framework-abort
    #[arg(short, long, default_value = "framework-graceful")]
    pub mode: ShutdownMode,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "flexboard.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
    /// Fetch and show the scheduler's cluster configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "flexboard.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "flexboard.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
