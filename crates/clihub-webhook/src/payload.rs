//! Webhook wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The JSON body POSTed to a webhook URL on a status transition.
///
/// Optional fields are omitted when unset, so a `running` update carries
/// only the id and status while a terminal update carries the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusUpdate {
    /// The job this update is about.
    pub job_id: Uuid,
    /// New status, lowercase (`"running"`, `"completed"`, ...).
    pub status: String,
    /// When the job reached a terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Captured command output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error description on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Process exit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Caller-supplied metadata, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}
