//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod auth;
pub mod cli;
pub mod jobs;
pub mod logging;
pub mod server;
pub mod webhooks;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::cli::CliConfig;
use self::jobs::JobsConfig;
use self::logging::LoggingConfig;
use self::server::ServerConfig;
use self::webhooks::WebhookConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay). Every
/// section has a complete default, so an empty configuration is valid.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// API authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Wrapped CLI settings.
    #[serde(default)]
    pub cli: CliConfig,
    /// Job orchestration settings.
    #[serde(default)]
    pub jobs: JobsConfig,
    /// Webhook delivery settings.
    #[serde(default)]
    pub webhooks: WebhookConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CLIHUB_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CLIHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jobs.max_concurrent == 0 {
            return Err(AppError::configuration(
                "jobs.max_concurrent must be at least 1",
            ));
        }
        if self.auth.require_auth && self.auth.api_keys.is_empty() {
            return Err(AppError::configuration(
                "auth.api_keys must not be empty when auth.require_auth is set",
            ));
        }
        if self.cli.binary.trim().is_empty() {
            return Err(AppError::configuration("cli.binary must not be empty"));
        }
        if self.webhooks.enabled && self.webhooks.secret.is_empty() {
            tracing::warn!("webhooks enabled without a signing secret; updates will be unsigned");
        }
        Ok(())
    }
}
