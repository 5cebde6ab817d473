//! Core traits defined in `clihub-core` and implemented by other crates.

pub mod executor;

pub use executor::{CommandExecutor, ExecutionOutput};
