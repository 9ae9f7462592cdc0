use crate::error::AppError;
use crate::models::{DownloadUrlResponse, UploadResponse, UploadedFile};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use futures::TryStreamExt;
use std::time::Duration;
use tokio_util::io::StreamReader;

/// How long a signed download URL stays valid.
pub const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(60);

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = Multipart, description = "Multipart form with a `file` field"),
    responses(
        (status = 200, description = "File stored in the bucket", body = UploadResponse),
        (status = 400, description = "No file field in the request"),
        (status = 500, description = "Object storage rejected the write")
    )
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.into()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        // The original filename is the object key, verbatim. Re-uploading a
        // name overwrites the stored object but still appends a new record.
        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let body_with_io_error =
            field.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err));
        let reader = StreamReader::new(body_with_io_error);

        let result = state
            .storage
            .upload_stream(&filename, &content_type, Box::new(reader))
            .await
            .map_err(AppError::Upload)?;

        tracing::info!(
            "📦 Stored '{}' ({} bytes) in the bucket",
            result.s3_key,
            result.size
        );

        let file = UploadedFile {
            url: state.storage.public_url(&filename),
            name: filename,
        };
        state.registry.record(file.clone());

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file,
        }));
    }

    Err(AppError::NoFile)
}

#[utoipa::path(
    get,
    path = "/files",
    responses(
        (status = 200, description = "Uploads recorded since process start, oldest first", body = Vec<UploadedFile>)
    )
)]
pub async fn list_files(State(state): State<crate::AppState>) -> Json<Vec<UploadedFile>> {
    Json(state.registry.snapshot())
}

#[utoipa::path(
    get,
    path = "/download/{file_name}",
    params(
        ("file_name" = String, Path, description = "Object key to sign a download URL for")
    ),
    responses(
        (status = 200, description = "Signed URL, valid for 60 seconds", body = DownloadUrlResponse),
        (status = 500, description = "Provider refused to issue the URL")
    )
)]
pub async fn download_url(
    State(state): State<crate::AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<DownloadUrlResponse>, AppError> {
    let download_url = state
        .storage
        .presign_download(&file_name, DOWNLOAD_URL_TTL)
        .await
        .map_err(AppError::DownloadLink)?;

    Ok(Json(DownloadUrlResponse { download_url }))
}
