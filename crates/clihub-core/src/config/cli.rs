//! Wrapped CLI configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Settings for the CLI binary that jobs execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Name or path of the CLI binary.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Working directory commands run in.
    #[serde(default = "default_working_dir")]
    pub working_dir: String,
    /// Hard per-job execution timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Extra environment variables injected into every invocation.
    #[serde(default)]
    pub environment: HashMap<String, String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            working_dir: default_working_dir(),
            timeout_seconds: default_timeout(),
            environment: HashMap::new(),
        }
    }
}

fn default_binary() -> String {
    "pilot".to_string()
}

fn default_working_dir() -> String {
    ".".to_string()
}

fn default_timeout() -> u64 {
    600
}
