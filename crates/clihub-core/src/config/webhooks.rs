//! Webhook delivery configuration.

use serde::{Deserialize, Serialize};

/// Outbound webhook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Whether status update delivery is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Shared secret for HMAC-SHA256 payload signing. Empty disables signing.
    #[serde(default)]
    pub secret: String,
    /// Number of retries after a failed delivery attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff between retries in seconds (grows linearly per attempt).
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            secret: String::new(),
            max_retries: default_max_retries(),
            retry_backoff_seconds: default_retry_backoff(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    30
}
