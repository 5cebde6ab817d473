//! Job manager, the single entry point for job operations.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use clihub_core::config::AppConfig;
use clihub_core::config::jobs::JobsConfig;
use clihub_core::error::{AppError, ErrorKind};
use clihub_core::result::AppResult;
use clihub_core::traits::executor::{CommandExecutor, ExecutionOutput};
use clihub_webhook::{JobStatusUpdate, WebhookSender};

use crate::eviction;
use crate::model::{Job, JobRequest};
use crate::registry::CancellationRegistry;
use crate::status::JobStatus;
use crate::store::JobStore;
use crate::validator;

/// Composes the store, dispatcher, cancellation registry, eviction loop,
/// and webhook sender behind one surface.
///
/// Cloning is cheap; all clones share state. The eviction loop starts with
/// the manager and stops at shutdown.
#[derive(Debug, Clone)]
pub struct JobManager {
    store: Arc<JobStore>,
    registry: Arc<CancellationRegistry>,
    semaphore: Arc<Semaphore>,
    executor: Arc<dyn CommandExecutor>,
    webhooks: Arc<WebhookSender>,
    config: JobsConfig,
    execution_timeout: Duration,
}

impl JobManager {
    /// Build a manager and start its eviction loop.
    pub fn new(
        config: &AppConfig,
        executor: Arc<dyn CommandExecutor>,
        webhooks: Arc<WebhookSender>,
    ) -> Self {
        let manager = Self {
            store: Arc::new(JobStore::new()),
            registry: Arc::new(CancellationRegistry::new()),
            semaphore: Arc::new(Semaphore::new(config.jobs.max_concurrent)),
            executor,
            webhooks,
            config: config.jobs.clone(),
            execution_timeout: Duration::from_secs(config.cli.timeout_seconds),
        };
        tokio::spawn(eviction::run(
            manager.store.clone(),
            manager.config.clone(),
            manager.registry.shutdown_token(),
        ));
        manager
    }

    /// Validate a request, record a pending job, and dispatch it.
    ///
    /// Returns the pending record immediately; execution proceeds in the
    /// background. A rejected request leaves no record.
    pub async fn create_job(&self, request: JobRequest) -> AppResult<Job> {
        if self.semaphore.is_closed() {
            return Err(AppError::service_unavailable("job manager is shutting down"));
        }
        validator::validate(&request)?;

        let job = Job::new(request, self.config.default_ttl_seconds);
        let id = job.id;
        self.store.insert(job.clone()).await;
        info!(job_id = %id, command = %job.command, "job created");

        let manager = self.clone();
        tokio::spawn(async move { manager.execute(id).await });
        Ok(job)
    }

    /// Fetch a job by id.
    pub async fn get_job(&self, id: Uuid) -> AppResult<Job> {
        self.store.get(id).await
    }

    /// List jobs, optionally filtered by status and capped at `limit`.
    pub async fn list_jobs(&self, status: Option<JobStatus>, limit: Option<usize>) -> Vec<Job> {
        self.store.list(status, limit).await
    }

    /// Cancel a job.
    ///
    /// The cancelled state is committed before the execution is signalled,
    /// so a result arriving concurrently loses the race and is dropped. A
    /// job that already finished yields a conflict and stays untouched.
    pub async fn cancel_job(&self, id: Uuid) -> AppResult<Job> {
        let job = self
            .store
            .finish(id, JobStatus::Cancelled, None, None, None)
            .await?;
        self.registry.cancel(id).await;
        info!(job_id = %id, "job cancelled");
        self.notify(&job);
        Ok(job)
    }

    /// Stop accepting work and cancel everything in flight.
    ///
    /// Dispatches waiting for a slot abandon, running executions observe
    /// cancellation, and every non-terminal job is marked cancelled. The
    /// cancelled states are committed before the tokens fire so that late
    /// execution results lose the race deterministically.
    pub async fn shutdown(&self) {
        info!("job manager shutting down");
        self.semaphore.close();
        for job in self.store.list(None, None).await {
            if !job.status.is_terminal() {
                let _ = self
                    .store
                    .finish(job.id, JobStatus::Cancelled, None, None, None)
                    .await;
            }
        }
        self.registry.cancel_all().await;
    }

    /// The execution task spawned per job.
    async fn execute(&self, id: Uuid) {
        let shutdown = self.registry.shutdown_token();

        let permit = tokio::select! {
            permit = Arc::clone(&self.semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                // Semaphore closed: shutting down.
                Err(_) => return,
            },
            _ = shutdown.cancelled() => {
                debug!(job_id = %id, "dispatch abandoned at shutdown");
                return;
            }
        };
        // Held until this task exits, panics included.
        let _permit = permit;

        if shutdown.is_cancelled() {
            return;
        }

        let job = match self.store.start(id).await {
            Ok(job) => job,
            Err(e) if e.kind == ErrorKind::Conflict => {
                debug!(job_id = %id, "job cancelled before dispatch");
                return;
            }
            Err(e) => {
                warn!(job_id = %id, error = %e, "failed to start job");
                return;
            }
        };
        self.notify(&job);

        let token = self.registry.register(id).await;
        let outcome = self.run_command(&job, token).await;
        self.registry.unregister(id).await;

        let (status, output, error_text, exit_code) = match outcome {
            Ok(result) if result.exit_code == 0 => {
                (JobStatus::Completed, Some(result.output), None, Some(0))
            }
            Ok(result) => {
                let error_text = if result.error.is_empty() {
                    format!("command exited with code {}", result.exit_code)
                } else {
                    result.error
                };
                (
                    JobStatus::Failed,
                    Some(result.output),
                    Some(error_text),
                    Some(result.exit_code),
                )
            }
            Err(e) => (JobStatus::Failed, None, Some(e.message), Some(1)),
        };

        match self
            .store
            .finish(id, status, output, error_text, exit_code)
            .await
        {
            Ok(finished) => {
                info!(job_id = %id, status = %finished.status, "job finished");
                self.notify(&finished);
            }
            Err(e) if e.kind == ErrorKind::Conflict => {
                // Cancellation won the race; the late result is dropped.
                debug!(job_id = %id, "result discarded, job already finished");
            }
            Err(e) => {
                warn!(job_id = %id, error = %e, "failed to record job result");
            }
        }
    }

    /// Run the executor inside the configured timeout, containing panics.
    async fn run_command(&self, job: &Job, token: CancellationToken) -> AppResult<ExecutionOutput> {
        let executor = Arc::clone(&self.executor);
        let command = job.command.clone();
        let args = job.args.clone();
        let exec_token = token.clone();
        let handle =
            tokio::spawn(async move { executor.execute(&command, &args, exec_token).await });

        match tokio::time::timeout(self.execution_timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) if join_err.is_panic() => Err(AppError::execution(format!(
                "command execution panicked: {}",
                panic_message(join_err)
            ))),
            Ok(Err(_)) => Err(AppError::execution("command execution task was aborted")),
            Err(_) => {
                // The execution outlived its timeout; signal it to stop.
                token.cancel();
                Err(AppError::execution(format!(
                    "command execution timed out after {}s",
                    self.execution_timeout.as_secs()
                )))
            }
        }
    }

    /// Fire-and-forget a webhook for a transition, when configured.
    fn notify(&self, job: &Job) {
        if !self.webhooks.is_enabled() {
            return;
        }
        let Some(url) = job.webhook_url.clone() else {
            return;
        };
        let update = JobStatusUpdate {
            job_id: job.id,
            status: job.status.to_string(),
            completed_at: job.completed_at,
            output: job.output.clone(),
            error: job.error.clone(),
            exit_code: job.exit_code,
            metadata: job.metadata.clone(),
        };
        let sender = Arc::clone(&self.webhooks);
        tokio::spawn(async move {
            if let Err(e) = sender.send(&url, &update).await {
                error!(job_id = %update.job_id, error = %e, "dropping webhook update");
            }
        });
    }
}

fn panic_message(err: tokio::task::JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => {
            if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            }
        }
        Err(e) => e.to_string(),
    }
}
