use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One successful upload, as remembered by the in-process registry.
///
/// `url` is the deterministic public bucket URL, not the signed one handed out
/// by the download endpoint. Whether it actually resolves depends on the
/// bucket policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedFile {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub file: UploadedFile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DownloadUrlResponse {
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
}
