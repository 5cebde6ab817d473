//! Tower middleware for the API router.

pub mod auth;
pub mod logging;
