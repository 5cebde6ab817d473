//! Command executor trait for pluggable CLI backends.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::result::AppResult;

/// The outcome of one command invocation.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ExecutionOutput {
    /// Captured command output (stdout or the CLI's output file).
    pub output: String,
    /// Captured diagnostic output (stderr), empty on a clean run.
    pub error: String,
    /// Process exit code.
    pub exit_code: i32,
}

/// Trait for command execution backends.
///
/// The production implementation in `clihub-executor` shells out to the
/// configured CLI binary; tests substitute scripted implementations. The
/// [`CommandExecutor`] trait is defined here in `clihub-core` so that the
/// job manager depends only on the capability, not the subprocess plumbing.
///
/// Implementations must watch `cancel` and return promptly once it fires;
/// the returned output is discarded in that case.
#[async_trait]
pub trait CommandExecutor: Send + Sync + std::fmt::Debug + 'static {
    /// Run `command` with `args` to completion or cancellation.
    ///
    /// An `Err` means the command could not be run or finished abnormally;
    /// a non-zero `exit_code` inside an `Ok` output also marks failure.
    async fn execute(
        &self,
        command: &str,
        args: &[String],
        cancel: CancellationToken,
    ) -> AppResult<ExecutionOutput>;
}
