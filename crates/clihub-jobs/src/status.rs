//! Job status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an asynchronous job.
///
/// Transitions are one-directional: `Pending → Running → Completed|Failed`,
/// with `Cancelled` reachable from `Pending` or `Running`. Terminal states
/// are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted, waiting for a dispatch slot.
    Pending,
    /// Currently executing.
    Running,
    /// Finished with exit code 0.
    Completed,
    /// Finished with an error or a non-zero exit code.
    Failed,
    /// Stopped by the caller or by shutdown before finishing.
    Cancelled,
}

impl JobStatus {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
