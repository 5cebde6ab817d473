//! CLI command executor.
//!
//! Translates a validated job into a child process invocation of the
//! wrapped binary. Commands run through `bash -c` with a `'n'` answer
//! piped to stdin so interactive confirmation prompts never block a
//! headless run.
//!
//! The wrapped binary is told to write its primary output to a
//! per-invocation temp file (`PILOT_OUTPUT_FILE`). When the file ends
//! up non-empty it is preferred over captured stdout, which keeps
//! progress spinners and ANSI redraws out of the job record.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use clihub_core::config::cli::CliConfig;
use clihub_core::traits::{CommandExecutor, ExecutionOutput};
use clihub_core::{AppError, AppResult};

/// Executes commands against the configured CLI binary.
#[derive(Debug, Clone)]
pub struct CliExecutor {
    config: CliConfig,
}

impl CliExecutor {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Builds the shell line for one invocation.
    ///
    /// Every token is single-quoted, so argument content can never be
    /// interpreted by the shell.
    fn build_script(&self, command: &str, args: &[String]) -> String {
        let mut line = format!("echo 'n' | {} {}", quote(&self.config.binary), quote(command));
        for arg in args {
            line.push(' ');
            line.push_str(&quote(arg));
        }
        line
    }

    fn output_file_path(&self) -> PathBuf {
        std::env::temp_dir().join(format!("clihub-{}.out", Uuid::new_v4()))
    }
}

#[async_trait]
impl CommandExecutor for CliExecutor {
    async fn execute(
        &self,
        command: &str,
        args: &[String],
        cancel: CancellationToken,
    ) -> AppResult<ExecutionOutput> {
        if cancel.is_cancelled() {
            return Err(AppError::execution("command cancelled before start"));
        }

        let script = self.build_script(command, args);
        let output_path = self.output_file_path();
        let started = Instant::now();

        debug!(command, script = %script, "spawning CLI command");

        let mut child = Command::new("bash");
        child
            .arg("-c")
            .arg(&script)
            .current_dir(&self.config.working_dir)
            .env("PILOT_HEADLESS", "1")
            .env("PILOT_OUTPUT_FILE", &output_path)
            .env("PILOT_SKIP_UPGRADE", "1")
            .env("PILOT_DISABLE_SUGGESTIONS", "1")
            .env("PILOT_COLUMNS", "120")
            .envs(&self.config.environment)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = child.spawn().map_err(|err| {
            AppError::execution(format!("failed to spawn '{}': {err}", self.config.binary))
        })?;

        let raw = tokio::select! {
            result = child.wait_with_output() => result.map_err(|err| {
                AppError::execution(format!("failed to collect command output: {err}"))
            })?,
            _ = cancel.cancelled() => {
                // Dropping the wait future drops the child handle, and
                // kill_on_drop reaps the process.
                let _ = tokio::fs::remove_file(&output_path).await;
                return Err(AppError::execution("command cancelled"));
            }
        };

        let stdout = String::from_utf8_lossy(&raw.stdout).to_string();
        let stderr = String::from_utf8_lossy(&raw.stderr).to_string();
        // None means the process died on a signal.
        let exit_code = raw.status.code().unwrap_or(-1);

        let file_output = tokio::fs::read_to_string(&output_path)
            .await
            .unwrap_or_default();
        let _ = tokio::fs::remove_file(&output_path).await;

        let output = if file_output.trim().is_empty() {
            stdout
        } else {
            file_output
        };

        debug!(
            command,
            exit_code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "CLI command finished"
        );

        Ok(ExecutionOutput {
            output,
            error: stderr,
            exit_code,
        })
    }
}

/// Single-quotes a token for POSIX shells.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
