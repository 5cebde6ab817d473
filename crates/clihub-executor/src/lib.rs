//! # clihub-executor
//!
//! Runs CLI commands as child processes on behalf of the job manager.
//! The executor is the only part of the system that touches the wrapped
//! binary; everything above it works with [`clihub_core::traits::CommandExecutor`].

pub mod cli;

pub use cli::CliExecutor;
