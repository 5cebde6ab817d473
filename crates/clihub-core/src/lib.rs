//! # clihub-core
//!
//! Core crate for CliHub. Contains the executor trait, configuration
//! schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CliHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
