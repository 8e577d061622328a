//! Task handlers: submission, status polling, file retrieval.

use super::{SubmitTaskQuery, SubmitTaskResponse};
use crate::api::AppState;
use crate::error::{Error, Result};
use crate::types::{LogTask, TaskId};
use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// Parse and validate a task id from the request path
///
/// The boundary layer rejects non-positive ids before consulting the
/// registry; ids are always issued starting from 1.
fn validate_task_id(raw: i64) -> Result<TaskId> {
    if raw <= 0 {
        return Err(Error::Validation(format!(
            "task id must be positive, got {raw}"
        )));
    }
    Ok(TaskId::new(raw))
}

/// POST /logs/tasks - Submit a new extraction task
#[utoipa::path(
    post,
    path = "/logs/tasks",
    tag = "tasks",
    params(
        ("date" = String, Query, description = "Date to filter by (yyyy-MM-dd)")
    ),
    responses(
        (status = 202, description = "Task accepted", body = SubmitTaskResponse),
        (status = 400, description = "Missing or empty date", body = crate::error::ApiError)
    )
)]
pub async fn submit_task(
    State(state): State<AppState>,
    Query(query): Query<SubmitTaskQuery>,
) -> Result<impl IntoResponse> {
    let date = query.date.unwrap_or_default();
    let task_id = state.service.submit(&date).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitTaskResponse { task_id }),
    ))
}

/// GET /logs/tasks/:id - Get task status
#[utoipa::path(
    get,
    path = "/logs/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Task snapshot", body = LogTask),
        (status = 400, description = "Invalid task id", body = crate::error::ApiError),
        (status = 404, description = "Unknown task id", body = crate::error::ApiError)
    )
)]
pub async fn get_task_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LogTask>> {
    let id = validate_task_id(id)?;
    let task = state.service.status(id).await?;

    Ok(Json(task))
}

/// GET /logs/tasks/:id/file - Download the produced file
///
/// Streams the filtered log as an attachment. The content is re-derived
/// from the task's stored date at fetch time.
#[utoipa::path(
    get,
    path = "/logs/tasks/{id}/file",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Filtered log file", content_type = "text/plain"),
        (status = 400, description = "Invalid task id", body = crate::error::ApiError),
        (status = 404, description = "Unknown task id", body = crate::error::ApiError),
        (status = 409, description = "Task still in progress or failed", body = crate::error::ApiError)
    )
)]
pub async fn download_task_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let id = validate_task_id(id)?;
    let file_path = state.service.fetch(id).await?;

    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| Error::Internal(format!("invalid output path {}", file_path.display())))?;

    let file = tokio::fs::File::open(&file_path).await?;
    let stream = ReaderStream::new(file);

    tracing::debug!(task_id = %id, file = %file_name, "Serving filtered log file");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| Error::Internal(format!("failed to build file response: {e}")))?;

    Ok(response)
}
