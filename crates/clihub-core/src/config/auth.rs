//! API authentication configuration.

use serde::{Deserialize, Serialize};

/// API key authentication configuration.
///
/// When `require_auth` is set, every request outside the health endpoint
/// must carry one of `api_keys` in the `X-API-Key` header.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Whether API key authentication is enforced.
    #[serde(default)]
    pub require_auth: bool,
    /// Accepted API keys.
    #[serde(default)]
    pub api_keys: Vec<String>,
}
