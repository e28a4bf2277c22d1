use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{ExportError, ExportStatus};
use crate::state::AppState;

#[derive(Serialize)]
pub struct RetryResponse {
    pub generation: u64,
}

fn pdf_response(bytes: Bytes, filename: &str, disposition: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// GET /api/v1/export
/// Renders the current document synchronously and returns it as a download.
pub async fn handle_export_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let resume = state.snapshot().await;
    let artifact = state.exports.render_now(resume).await?;
    info!(
        filename = %artifact.filename,
        pages = artifact.pages,
        level = artifact.scale.compression_level.as_str(),
        "Exported PDF"
    );
    Ok(pdf_response(artifact.bytes, &artifact.filename, "attachment"))
}

/// GET /api/v1/export/status
pub async fn handle_export_status(State(state): State<AppState>) -> Json<ExportStatus> {
    Json(state.exports.status())
}

/// POST /api/v1/export/retry
pub async fn handle_export_retry(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<RetryResponse>), AppError> {
    let generation = state.exports.retry()?;
    Ok((StatusCode::ACCEPTED, Json(RetryResponse { generation })))
}

/// GET /api/v1/exports/:id
pub async fn handle_get_artifact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let artifact = state
        .exports
        .artifacts()
        .get(id)
        .ok_or(ExportError::ArtifactNotFound(id))?;
    Ok(pdf_response(
        artifact.bytes,
        &artifact.reference.filename,
        "inline",
    ))
}

/// DELETE /api/v1/exports/:id
/// Releases the artifact. A second release of the same id is a 404.
pub async fn handle_release_artifact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.exports.artifacts().release(id) {
        return Err(ExportError::ArtifactNotFound(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
