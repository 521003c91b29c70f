use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::{ApiEnvelope, ContestSource, SourceError};
use crate::config::SourceConfig;

/// [`ContestSource`] backed by the platform's public HTTP API.
pub struct CodeforcesClient {
    http: reqwest::Client,
    api_url: String,
    throttle: Throttle,
}

impl CodeforcesClient {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            throttle: Throttle::new(Duration::from_millis(config.request_interval_ms)),
        })
    }
}

#[async_trait]
impl ContestSource for CodeforcesClient {
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Value, SourceError> {
        self.throttle.wait().await;

        let url = format!("{}/{}", self.api_url, method);
        debug!(%url, ?params, "Calling upstream API");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Failed calls still carry an envelope with a comment, on 4xx as well.
        match serde_json::from_str::<ApiEnvelope>(&body) {
            Ok(envelope) => envelope.into_result(),
            Err(_) if !status.is_success() => Err(SourceError::Status(status.as_u16())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Spaces outbound requests at least `interval` apart.
struct Throttle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
