use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything the HTTP surface can fail with.
///
/// Storage-side detail stays in the server logs; clients only ever see the
/// generic message for the failure class.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("multipart body carried no `file` field")]
    NoFile,

    #[error("object storage write failed: {0}")]
    Upload(#[source] anyhow::Error),

    #[error("signed URL issuance failed: {0}")]
    DownloadLink(#[source] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NoFile => (StatusCode::BAD_REQUEST, "No file uploaded"),
            AppError::Upload(e) => {
                tracing::error!("Upload error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Upload failed")
            }
            AppError::DownloadLink(e) => {
                tracing::error!("Download link error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Download link error")
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
