//! One-shot API description command

use crate::cli::ApiArgs;
use crate::client::SchedulerClient;

/// Fetch the WADL service description and format it as a JSON document.
pub async fn handle_api(_args: &ApiArgs, client: &SchedulerClient) -> anyhow::Result<String> {
    let document = client.fetch_api_description().await?;
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_handle_api_transcodes_wadl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/application.wadl"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<application><resources base="/api/"><resource path="state"/></resources></application>"#,
            ))
            .mount(&server)
            .await;

        let client = SchedulerClient::new(server.uri(), Duration::from_secs(5));
        let args = ApiArgs {
            config: PathBuf::from("flexboard.toml"),
        };

        let output = handle_api(&args, &client).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["application"]["resources"]["@base"], "/api/");
    }
}
