//! Interactive console command implementation

use crate::cli::ConsoleArgs;
use crate::client::SchedulerClient;
use crate::config::{ConsoleConfig, LogFormat, LoggingConfig};
use crate::console::{ActionDispatcher, Console, LineOutcome, Route};
use crate::poller::Poller;
use crate::store::StateStore;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &ConsoleArgs) -> anyhow::Result<ConsoleConfig> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        ConsoleConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        ConsoleConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(ref url) = args.scheduler_url {
        config.scheduler.base_url = url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_poll {
        config.poll.enabled = false;
    }

    Ok(config)
}

/// Initialize tracing based on configuration.
///
/// Logs go to stderr so they never interleave with the rendered views on
/// stdout.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Build a scheduler client from configuration.
pub fn build_client(config: &ConsoleConfig) -> Arc<SchedulerClient> {
    Arc::new(SchedulerClient::new(
        config.scheduler.base_url.clone(),
        Duration::from_secs(config.scheduler.request_timeout_seconds),
    ))
}

/// Main console command handler
pub async fn run_console(args: ConsoleArgs) -> anyhow::Result<()> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!(scheduler = %config.scheduler.base_url, "Starting console");

    // 3. Shared state, client, teardown token
    let store = Arc::new(StateStore::new());
    let client = build_client(&config);
    let cancel = CancellationToken::new();

    // 4. One-time API description fetch, then background polling
    let poller = Poller::new(Arc::clone(&client), Arc::clone(&store), config.poll.clone());
    poller.load_api_description().await;

    let poller_handle = if config.poll.enabled {
        Some(poller.start(cancel.clone()))
    } else {
        tracing::info!("Background polling disabled");
        None
    };

    // 5. Console root
    let dispatcher = ActionDispatcher::new(Arc::clone(&client), cancel.clone());
    let mut console = Console::new(Arc::clone(&store), dispatcher);
    if let Some(ref route) = args.route {
        console.navigate(Route::parse(route));
    }

    println!("{}", console.render());

    // 6. Input loop
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("flexboard {}> ", console.route());
        std::io::stdout().flush()?;

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                tracing::info!("Received SIGINT, shutting down...");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if console.handle_line(&line) == LineOutcome::Quit {
                            break;
                        }
                        println!("{}", console.render());
                    }
                    None => break, // stdin closed
                }
            }
        }
    }

    // 7. Teardown: stop polling, abandon in-flight dispatches
    cancel.cancel();
    if let Some(handle) = poller_handle {
        handle.shutdown().await;
    }

    tracing::info!("Console stopped");
    Ok(())
}
