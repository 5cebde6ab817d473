//! Job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::JobStatus;

/// One tracked asynchronous execution of a validated CLI command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: Uuid,
    /// The CLI command to run.
    pub command: String,
    /// Positional arguments for the command.
    pub args: Vec<String>,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When dispatch began (the `running` transition).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state. Set exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Captured command output, populated on a terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error description, populated when the job failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Process exit code, populated when execution produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Caller-supplied metadata, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Optional URL notified on status transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Seconds after `created_at` at which the finished record becomes
    /// evictable.
    pub ttl_seconds: u64,
}

impl Job {
    /// Build a new pending job from a validated request.
    pub fn new(request: JobRequest, default_ttl_seconds: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: request.command,
            args: request.args,
            status: JobStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            output: None,
            error: None,
            exit_code: None,
            metadata: request.metadata,
            webhook_url: request.webhook_url,
            ttl_seconds: request.ttl_seconds.unwrap_or(default_ttl_seconds),
        }
    }

    /// Check whether the record's TTL has elapsed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.created_at).num_seconds();
        age >= 0 && age as u64 >= self.ttl_seconds
    }
}

/// Data required to create a new job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// The CLI command to run.
    pub command: String,
    /// Positional arguments for the command.
    #[serde(default)]
    pub args: Vec<String>,
    /// Opaque metadata echoed back in responses and webhook payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// URL to notify on status transitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Record TTL override in seconds; the configured default applies
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,
}
