//! File handlers for the HTTP API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::{Directory, FileRecord, ResolvedContent};
use crate::web::dto::{
    ApiJson, ApiResponse, CreateFileRequest, FileContentQuery, ListFilesQuery,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/directories - List all directories.
pub async fn list_directories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Directory>>>, ApiError> {
    let directories = state.files.list_directories().await?;
    tracing::debug!(count = directories.len(), "Listed directories");
    Ok(Json(ApiResponse::new(directories)))
}

/// GET /api/files?directoryId= - List the files of a directory.
///
/// A missing directory ID yields an empty list.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<FileRecord>>>, ApiError> {
    let files = match query.directory_id.as_deref().filter(|id| !id.is_empty()) {
        Some(directory_id) => {
            let files = state.files.list_files(directory_id).await?;
            tracing::debug!(directory_id = %directory_id, count = files.len(), "Listed files");
            files
        }
        None => Vec::new(),
    };
    Ok(Json(ApiResponse::new(files)))
}

/// POST /api/files - Create a file record.
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateFileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FileRecord>>), ApiError> {
    let new_file = req
        .into_new_file_record()
        .ok_or_else(|| ApiError::bad_request("directoryId and title are required"))?;

    let file = state.files.create_file_record(&new_file).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(file))))
}

/// GET /api/file-content?fileId= - Resolve a file's content.
pub async fn get_file_content(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FileContentQuery>,
) -> Result<Json<ApiResponse<ResolvedContent>>, ApiError> {
    let file_id = query
        .file_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("fileId is required"))?;

    let content = state.files.resolve_file_content(file_id).await?;
    Ok(Json(ApiResponse::new(content)))
}
