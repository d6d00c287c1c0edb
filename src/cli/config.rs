//! Config init and show command handlers

use crate::cli::{ConfigInitArgs, ConfigShowArgs};
use crate::client::SchedulerClient;
use crate::console::{views, Route};
use crate::store::StateStore;
use anyhow::bail;

const EXAMPLE_CONFIG: &str = include_str!("../../flexboard.example.toml");

/// Write the example configuration to the requested path.
pub fn handle_config_init(args: &ConfigInitArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    std::fs::write(&args.output, EXAMPLE_CONFIG)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

/// Fetch the scheduler's cluster configuration and format it for display.
pub async fn handle_config_show(
    args: &ConfigShowArgs,
    client: &SchedulerClient,
) -> anyhow::Result<String> {
    let config = client.fetch_config().await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&config)?);
    }

    let store = StateStore::new();
    store.set_config(config);
    Ok(views::render(Route::Config, &store.snapshot(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_config_init_writes_parseable_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("flexboard.toml");

        handle_config_init(&ConfigInitArgs {
            output: output.clone(),
            force: false,
        })
        .unwrap();

        let config = crate::config::ConsoleConfig::load(Some(&output)).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_init_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("flexboard.toml");
        std::fs::write(&output, "# existing").unwrap();

        let result = handle_config_init(&ConfigInitArgs {
            output: output.clone(),
            force: false,
        });
        assert!(result.is_err());

        // --force overwrites
        handle_config_init(&ConfigInitArgs {
            output,
            force: true,
        })
        .unwrap();
    }

    #[tokio::test]
    async fn test_config_show_renders_profiles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "profiles": {"xl": {"cpu": 8, "mem": 16}},
                "masterAddress": "10.0.0.1:5050",
                "apiPort": 8192
            })))
            .mount(&server)
            .await;

        let client = SchedulerClient::new(server.uri(), Duration::from_secs(5));
        let args = ConfigShowArgs {
            json: false,
            config: std::path::PathBuf::from("flexboard.toml"),
        };

        let output = handle_config_show(&args, &client).await.unwrap();
        assert!(output.contains("xl"));
        assert!(output.contains("10.0.0.1:5050"));
    }
}
