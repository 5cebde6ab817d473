//! API-key authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use clihub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects requests without a valid `X-API-Key` header.
///
/// A no-op when `auth.require_auth` is disabled. The health route is
/// mounted outside this layer.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.auth.require_auth {
        return Ok(next.run(request).await);
    }

    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if state.config.auth.api_keys.iter().any(|k| k == key) => {
            Ok(next.run(request).await)
        }
        _ => Err(AppError::authentication("missing or invalid API key").into()),
    }
}
