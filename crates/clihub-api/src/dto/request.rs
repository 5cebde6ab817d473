//! Request DTOs.

use serde::Deserialize;

use clihub_jobs::JobStatus;

/// Query parameters for `GET /api/jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsQuery {
    /// Exact-match status filter.
    pub status: Option<JobStatus>,
    /// Maximum number of jobs to return.
    pub limit: Option<usize>,
}
