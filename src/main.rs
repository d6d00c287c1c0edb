use clap::Parser;
use flexboard::cli::{
    actions, api, config as config_cmd, console, handle_completions, handle_config_init, tasks,
    Cli, Commands, ConfigCommands,
};
use flexboard::client::SchedulerClient;
use flexboard::config::ConsoleConfig;
use std::path::Path;
use std::time::Duration;

/// Load configuration for one-shot commands, falling back to defaults when
/// the file is absent.
fn load_config(path: &Path) -> ConsoleConfig {
    let config = if path.exists() {
        ConsoleConfig::load(Some(path)).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}", e);
            ConsoleConfig::default()
        })
    } else {
        ConsoleConfig::default()
    };
    config.with_env_overrides()
}

fn build_client(config: &ConsoleConfig) -> SchedulerClient {
    SchedulerClient::new(
        config.scheduler.base_url.clone(),
        Duration::from_secs(config.scheduler.request_timeout_seconds),
    )
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Console(args) => console::run_console(args).await,
        Commands::Tasks(args) => {
            let client = build_client(&load_config(&args.config));
            match tasks::handle_tasks(&args, &client).await {
                Ok(output) => {
                    println!("{}", output);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Api(args) => {
            let client = build_client(&load_config(&args.config));
            match api::handle_api(&args, &client).await {
                Ok(output) => {
                    println!("{}", output);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Flexup(args) => {
            let client = build_client(&load_config(&args.config));
            match actions::handle_flex(actions::FlexDirection::Up, &args, &client).await {
                Ok(msg) => {
                    println!("{}", msg);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Flexdown(args) => {
            let client = build_client(&load_config(&args.config));
            match actions::handle_flex(actions::FlexDirection::Down, &args, &client).await {
                Ok(msg) => {
                    println!("{}", msg);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Shutdown(args) => {
            let client = build_client(&load_config(&args.config));
            match actions::handle_shutdown(&args, &client).await {
                Ok(msg) => {
                    println!("{}", msg);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Config(config_command) => match config_command {
            ConfigCommands::Init(args) => handle_config_init(&args),
            ConfigCommands::Show(args) => {
                let client = build_client(&load_config(&args.config));
                match config_cmd::handle_config_show(&args, &client).await {
                    Ok(output) => {
                        println!("{}", output);
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
