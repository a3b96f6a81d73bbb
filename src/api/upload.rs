use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::{ApiError, AppState, FileUrlResponse};
use crate::api::validation::validate_upload_file_name;

/// POST /upload
/// Store the multipart `file` field under the upload directory
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FileUrlResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::validation(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let raw_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::validation("Uploaded file has no file name"))?;
        let file_name = validate_upload_file_name(&raw_name)?.to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        let dest = Path::new(&state.config().server.upload_path).join(&file_name);
        tokio::fs::write(&dest, &bytes).await.map_err(|e| {
            ApiError::internal(format!("Failed to save {}: {e}", dest.display()))
        })?;

        info!(file = %file_name, size = bytes.len(), "File uploaded");

        return Ok(Json(FileUrlResponse {
            file_url: format!("/uploads/{file_name}"),
        }));
    }

    Err(ApiError::validation("Missing multipart field 'file'"))
}
