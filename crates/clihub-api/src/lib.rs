//! # clihub-api
//!
//! HTTP API layer for CliHub built on Axum.
//!
//! Provides the REST endpoints, API-key auth middleware, CORS, request
//! logging, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
