//! Retrying webhook sender.

use std::time::Duration;

use tracing::{debug, warn};

use clihub_core::config::webhooks::WebhookConfig;
use clihub_core::error::AppError;
use clihub_core::result::AppResult;

use crate::payload::JobStatusUpdate;
use crate::signature;

/// Delivers status updates over HTTP with signing and bounded retry.
///
/// One sender is shared by all jobs; the underlying `reqwest::Client`
/// pools connections. Callers decide whether delivery applies at all
/// (see [`WebhookSender::is_enabled`]); `send` always attempts delivery.
#[derive(Debug)]
pub struct WebhookSender {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookSender {
    /// Build a sender from configuration.
    pub fn new(config: WebhookConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("clihub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::internal(format!("failed to build webhook client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Whether webhook delivery is enabled in configuration.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Deliver one status update.
    ///
    /// Makes up to `max_retries + 1` attempts, sleeping
    /// `retry_backoff * attempt` between them. Any 2xx response counts as
    /// delivered; everything else is retried and finally reported as an
    /// external-service error.
    pub async fn send(&self, url: &str, update: &JobStatusUpdate) -> AppResult<()> {
        let body = serde_json::to_string(update)?;
        let timestamp = chrono::Utc::now().timestamp();
        let signature_value = if self.config.secret.is_empty() {
            None
        } else {
            Some(signature::sign(&self.config.secret, timestamp, &body)?)
        };

        let attempts = self.config.max_retries + 1;
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match self
                .post(url, &body, timestamp, signature_value.as_deref())
                .await
            {
                Ok(()) => {
                    debug!(url, %update.job_id, status = %update.status, attempt, "webhook delivered");
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        url,
                        %update.job_id,
                        attempt,
                        attempts,
                        error = %e,
                        "webhook delivery attempt failed"
                    );
                    last_error = e;
                    if attempt < attempts {
                        let backoff =
                            Duration::from_secs(self.config.retry_backoff_seconds * attempt as u64);
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        Err(AppError::external_service(format!(
            "webhook delivery to {url} failed after {attempts} attempts: {last_error}"
        )))
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        timestamp: i64,
        signature_value: Option<&str>,
    ) -> Result<(), String> {
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(signature::TIMESTAMP_HEADER, timestamp.to_string())
            .body(body.to_string());
        if let Some(sig) = signature_value {
            request = request.header(signature::SIGNATURE_HEADER, sig);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("received status {status}"))
        }
    }
}
