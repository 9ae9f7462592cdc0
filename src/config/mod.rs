use anyhow::{Context, Result};
use std::env;

/// Default cap on request bodies, and therefore on a single upload (256 MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 256 * 1024 * 1024;

/// Runtime configuration, sourced entirely from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// AWS region the bucket lives in
    pub region: String,

    /// Access key id for the bucket credentials
    pub access_key: String,

    /// Secret access key for the bucket credentials
    pub secret_key: String,

    /// Target bucket name
    pub bucket: String,

    /// Maximum accepted upload size in bytes (default: 256 MB)
    pub max_upload_size: usize,
}

impl AppConfig {
    /// Load configuration from environment variables. The AWS settings are
    /// required; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            region: env::var("AWS_REGION").context("AWS_REGION must be set")?,
            access_key: env::var("AWS_ACCESS_KEY").context("AWS_ACCESS_KEY must be set")?,
            secret_key: env::var("AWS_SECRET_KEY").context("AWS_SECRET_KEY must be set")?,
            bucket: env::var("AWS_BUCKET_NAME").context("AWS_BUCKET_NAME must be set")?,
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
        })
    }
}
