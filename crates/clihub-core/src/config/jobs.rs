//! Job orchestration configuration.

use serde::{Deserialize, Serialize};

/// Job dispatcher and history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Maximum number of jobs executing at once.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Default time-to-live of a finished job record in seconds.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    /// Interval in seconds between history cleanup sweeps.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
    /// Maximum number of job records retained in history.
    #[serde(default = "default_max_history")]
    pub max_history_size: usize,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            default_ttl_seconds: default_ttl(),
            cleanup_interval_seconds: default_cleanup_interval(),
            max_history_size: default_max_history(),
        }
    }
}

fn default_max_concurrent() -> usize {
    5
}

fn default_ttl() -> u64 {
    86_400
}

fn default_cleanup_interval() -> u64 {
    3_600
}

fn default_max_history() -> usize {
    1_000
}
