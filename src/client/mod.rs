//! Typed client for the scheduler's REST API.
//!
//! One operation per remote resource or command. No operation retries
//! internally; each call is fire-once with a per-call timeout, and the
//! caller decides what a failure means (the poller absorbs them, the
//! dispatcher logs them).

mod error;
pub mod wadl;

pub use error::ClientError;

use crate::model::{ClusterConfig, ShutdownMode, TaskSnapshot};
use serde_json::json;
use std::time::Duration;

/// Acknowledgement of an accepted mutating command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// HTTP status the scheduler answered with
    pub status: u16,
}

/// HTTP client for the scheduler service.
///
/// # Examples
///
/// ```
/// use flexboard::client::SchedulerClient;
/// use std::time::Duration;
///
/// let client = SchedulerClient::new("http://127.0.0.1:8192", Duration::from_secs(5));
/// assert_eq!(client.base_url(), "http://127.0.0.1:8192");
/// ```
pub struct SchedulerClient {
    base_url: String,
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl SchedulerClient {
    /// Create a client for the scheduler at `base_url` with a per-call timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout_seconds: timeout.as_secs(),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn classify_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout_seconds)
        } else {
            ClientError::Transport(e.to_string())
        }
    }

    async fn read_success_body(&self, response: reqwest::Response) -> Result<String, ClientError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_error(e))?;

        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Fetch the cluster configuration (`GET /api/config`).
    pub async fn fetch_config(&self) -> Result<ClusterConfig, ClientError> {
        let url = format!("{}/api/config", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let body = self.read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Fetch the task snapshot (`GET /api/state`).
    pub async fn fetch_tasks(&self) -> Result<TaskSnapshot, ClientError> {
        let url = format!("{}/api/state", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let body = self.read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Fetch the WADL service description and transcode it to a document
    /// (`GET /api/application.wadl`).
    ///
    /// A transcode failure ([`ClientError::Transcode`]) is distinct from a
    /// transport failure; the payload was received but is not usable XML.
    pub async fn fetch_api_description(&self) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}/api/application.wadl", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let body = self.read_success_body(response).await?;
        wadl::transcode(&body)
    }

    fn validate_flex(profile: &str, instances: u32) -> Result<(), ClientError> {
        if profile.trim().is_empty() {
            return Err(ClientError::Validation("profile must not be empty".to_string()));
        }
        if instances == 0 || instances > 999 {
            return Err(ClientError::Validation(format!(
                "instances must be between 1 and 999, got {}",
                instances
            )));
        }
        Ok(())
    }

    /// Request `instances` additional workers of `profile`
    /// (`PUT /api/cluster/flexup`).
    pub async fn flex_up(&self, profile: &str, instances: u32) -> Result<Ack, ClientError> {
        Self::validate_flex(profile, instances)?;
        self.put_flex("flexup", profile, instances).await
    }

    /// Request `instances` fewer workers of `profile`
    /// (`PUT /api/cluster/flexdown`).
    ///
    /// Both flex directions send the same `{profile, instances}` body.
    pub async fn flex_down(&self, profile: &str, instances: u32) -> Result<Ack, ClientError> {
        Self::validate_flex(profile, instances)?;
        self.put_flex("flexdown", profile, instances).await
    }

    async fn put_flex(
        &self,
        direction: &str,
        profile: &str,
        instances: u32,
    ) -> Result<Ack, ClientError> {
        let url = format!("{}/api/cluster/{}", self.base_url, direction);
        let response = self
            .client
            .put(&url)
            .json(&json!({ "profile": profile, "instances": instances }))
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        self.read_success_body(response).await?;
        Ok(Ack {
            status: status.as_u16(),
        })
    }

    /// Shut the framework down (`POST /api/framework/shutdown/<mode>`).
    pub async fn shutdown(&self, mode: ShutdownMode) -> Result<Ack, ClientError> {
        let url = format!(
            "{}/api/framework/shutdown/{}",
            self.base_url,
            mode.path_segment()
        );
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        self.read_success_body(response).await?;
        Ok(Ack {
            status: status.as_u16(),
        })
    }
}
