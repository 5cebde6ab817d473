//! In-memory job store and lifecycle state machine.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use clihub_core::error::AppError;
use clihub_core::result::AppResult;

use crate::model::Job;
use crate::status::JobStatus;

/// Counts from one cleanup sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupStats {
    /// Records removed because their TTL elapsed.
    pub expired: usize,
    /// Records removed to enforce the history size cap.
    pub trimmed: usize,
}

/// The sole owner of job records.
///
/// Reads run in parallel, mutations take the write lock. All accessors
/// return clones; callers never hold references into the table. Lifecycle
/// transitions go through [`JobStore::start`] and [`JobStore::finish`] so
/// the state machine is enforced in one place.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created job.
    pub async fn insert(&self, job: Job) {
        self.jobs.write().await.insert(job.id, job);
    }

    /// Fetch a job by id.
    pub async fn get(&self, id: Uuid) -> AppResult<Job> {
        self.jobs
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("job {id} not found")))
    }

    /// List jobs, optionally filtered by exact status and capped at `limit`.
    ///
    /// No ordering is guaranteed.
    pub async fn list(&self, status: Option<JobStatus>, limit: Option<usize>) -> Vec<Job> {
        let jobs = self.jobs.read().await;
        let iter = jobs
            .values()
            .filter(|job| status.map_or(true, |s| job.status == s))
            .cloned();
        match limit {
            Some(n) => iter.take(n).collect(),
            None => iter.collect(),
        }
    }

    /// Number of records currently held.
    pub async fn count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Transition a pending job to running and stamp `started_at`.
    ///
    /// Returns the updated record. Fails with a conflict when the job is no
    /// longer pending (cancelled while waiting for a slot, typically).
    pub async fn start(&self, id: Uuid) -> AppResult<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("job {id} not found")))?;
        if job.status != JobStatus::Pending {
            return Err(AppError::conflict(format!(
                "job {id} is {}, not pending",
                job.status
            )));
        }
        job.status = JobStatus::Running;
        job.started_at = Some(Utc::now());
        Ok(job.clone())
    }

    /// Commit a terminal state.
    ///
    /// The first terminal transition wins: a job that is already terminal is
    /// left untouched and a conflict is returned, so a late execution result
    /// can never overwrite a cancellation (or vice versa). `completed_at` is
    /// stamped here and nowhere else.
    pub async fn finish(
        &self,
        id: Uuid,
        status: JobStatus,
        output: Option<String>,
        error: Option<String>,
        exit_code: Option<i32>,
    ) -> AppResult<Job> {
        debug_assert!(status.is_terminal());
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("job {id} not found")))?;
        if job.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "job {id} already finished as {}",
                job.status
            )));
        }
        job.status = status;
        job.completed_at = Some(Utc::now());
        job.output = output;
        job.error = error;
        job.exit_code = exit_code;
        Ok(job.clone())
    }

    /// Remove expired records, then trim the oldest finished records until
    /// the table fits `max_history`.
    ///
    /// Jobs that have not reached a terminal state are never removed, even
    /// past their TTL; they become evictable on the first sweep after they
    /// finish. Both passes run under a single write lock.
    pub async fn cleanup(&self, max_history: usize) -> CleanupStats {
        let now = Utc::now();
        let mut jobs = self.jobs.write().await;

        let before = jobs.len();
        jobs.retain(|_, job| !(job.status.is_terminal() && job.is_expired(now)));
        let expired = before - jobs.len();

        let mut trimmed = 0;
        if jobs.len() > max_history {
            let mut finished: Vec<(Uuid, chrono::DateTime<Utc>)> = jobs
                .values()
                .filter(|job| job.status.is_terminal())
                .map(|job| (job.id, job.created_at))
                .collect();
            finished.sort_by_key(|&(_, created_at)| created_at);

            let excess = jobs.len() - max_history;
            for (id, _) in finished.into_iter().take(excess) {
                jobs.remove(&id);
                trimmed += 1;
            }
        }

        CleanupStats { expired, trimmed }
    }
}
