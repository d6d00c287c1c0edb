//! Error types for the scheduler client.

use thiserror::Error;

/// Errors surfaced by [`SchedulerClient`](super::SchedulerClient) operations.
///
/// The client never retries; each variant describes a single failed attempt.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Request exceeded the per-call timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Network-level failure (connection refused, DNS, TLS, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body could not be decoded into the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),

    /// WADL payload could not be transcoded to a document
    #[error("WADL transcode failed: {0}")]
    Transcode(String),

    /// Command parameters were rejected before any request was sent
    #[error("invalid request: {0}")]
    Validation(String),
}
