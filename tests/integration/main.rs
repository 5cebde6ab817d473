//! Integration tests exercising the full HTTP API against an in-process
//! router with a scripted executor.

mod helpers;

mod auth_test;
mod commands_test;
mod health_test;
mod jobs_test;
mod webhook_test;
