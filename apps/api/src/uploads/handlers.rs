use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::object_key;

/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /upload
///
/// Stores the single `image` field and returns its public URL.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let key = object_key(field.file_name(), Utc::now().timestamp_millis());
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = field.bytes().await?;
        if body.is_empty() {
            return Err(AppError::InvalidRequest("Uploaded file is empty".to_string()));
        }

        let url = state.objects.put(&key, body, &content_type).await?;
        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::InvalidRequest("No file uploaded.".to_string()))
}
