//! Route definitions for the CliHub HTTP API.
//!
//! All routes are mounted under `/api`. Job and command routes sit behind
//! the API-key middleware; health does not.

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(job_routes())
        .merge(command_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    let api_routes = protected.merge(health_routes());

    let cors = build_cors_layer(&state);
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Job submission and lifecycle endpoints
fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(handlers::jobs::create_job))
        .route("/jobs", get(handlers::jobs::list_jobs))
        .route("/jobs/{id}", get(handlers::jobs::get_job))
        .route("/jobs/{id}/cancel", post(handlers::jobs::cancel_job))
}

/// Command catalog endpoints
fn command_routes() -> Router<AppState> {
    Router::new()
        .route("/commands", get(handlers::commands::list_commands))
        .route("/commands/{name}", get(handlers::commands::get_command))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderName, HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
