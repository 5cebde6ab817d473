//! Job orchestration for CliHub.
//!
//! This crate provides:
//! - The job entity and its lifecycle state machine
//! - An in-memory job store with TTL and size-capped history
//! - A command catalog and request validation
//! - A concurrency-bounded dispatcher with cooperative cancellation
//! - Webhook notification on status transitions

pub mod catalog;
pub mod eviction;
pub mod manager;
pub mod model;
pub mod registry;
pub mod status;
pub mod store;
pub mod validator;

pub use manager::JobManager;
pub use model::{Job, JobRequest};
pub use status::JobStatus;
