//! Job lifecycle handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use clihub_jobs::{Job, JobRequest};

use crate::dto::request::ListJobsQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Job>>), ApiError> {
    let job = state.manager.create_job(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(job))))
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Json<ApiResponse<Vec<Job>>> {
    let jobs = state.manager.list_jobs(params.status, params.limit).await;
    Json(ApiResponse::ok(jobs))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    let job = state.manager.get_job(id).await?;
    Ok(Json(ApiResponse::ok(job)))
}

/// POST /api/jobs/{id}/cancel
pub async fn cancel_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    let job = state.manager.cancel_job(id).await?;
    Ok(Json(ApiResponse::ok(job)))
}
