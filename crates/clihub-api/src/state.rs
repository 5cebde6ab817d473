//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use clihub_core::config::AppConfig;
use clihub_jobs::JobManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Job orchestration surface
    pub manager: Arc<JobManager>,
}
