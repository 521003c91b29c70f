//! Access to the upstream contest platform.
//!
//! Every endpoint answers with the same envelope,
//! `{"status": "OK" | "FAILED", "comment": ..., "result": ...}`; callers only
//! ever see the `result` body or a [`SourceError`].

mod client;
pub mod payload;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use client::CodeforcesClient;

/// Why an endpoint produced no data.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("API returned {status}: {comment}")]
    Api { status: String, comment: String },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Malformed(err.to_string())
    }
}

/// Request/response access to the upstream API, keyed by method name.
#[async_trait]
pub trait ContestSource: Send + Sync {
    /// Call `method` with query `params` and return the envelope's `result`.
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Value, SourceError>;
}

/// Call `method` and decode its result into `T`.
pub async fn fetch<T: DeserializeOwned>(
    source: &dyn ContestSource,
    method: &str,
    params: &[(&str, String)],
) -> Result<T, SourceError> {
    let value = source.call(method, params).await?;
    Ok(serde_json::from_value(value)?)
}

/// Response wrapper shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl ApiEnvelope {
    pub fn into_result(self) -> Result<Value, SourceError> {
        match (self.status.as_str(), self.result) {
            ("OK", Some(result)) => Ok(result),
            ("OK", None) => Err(SourceError::Malformed("missing result".into())),
            _ => Err(SourceError::Api {
                status: self.status,
                comment: self.comment.unwrap_or_else(|| "Unknown error".into()),
            }),
        }
    }
}
