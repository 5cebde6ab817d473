//! Command catalog handlers.

use axum::Json;
use axum::extract::Path;

use clihub_core::error::AppError;
use clihub_jobs::catalog::{self, CommandSpec};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;

/// GET /api/commands
pub async fn list_commands() -> Json<ApiResponse<Vec<CommandSpec>>> {
    Json(ApiResponse::ok(catalog::COMMANDS.to_vec()))
}

/// GET /api/commands/{name}
pub async fn get_command(
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<CommandSpec>>, ApiError> {
    let spec = catalog::find(&name)
        .ok_or_else(|| AppError::not_found(format!("command '{name}' not found")))?;
    Ok(Json(ApiResponse::ok(*spec)))
}
