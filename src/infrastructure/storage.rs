use crate::config::AppConfig;
use crate::services::storage::{S3StorageService, StorageService};
use aws_sdk_s3::config::{Credentials, Region};
use std::sync::Arc;
use tracing::info;

/// Build the S3 client from the environment-provided credentials and wrap it
/// in the storage seam the handlers talk to.
pub async fn setup_storage(config: &AppConfig) -> Arc<dyn StorageService> {
    info!(
        "☁️  S3 Storage: bucket '{}' in {}",
        config.bucket, config.region
    );

    let aws_config = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .credentials_provider(Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        ))
        .load()
        .await;

    let s3_client = aws_sdk_s3::Client::new(&aws_config);

    Arc::new(S3StorageService::new(
        s3_client,
        config.bucket.clone(),
        config.region.clone(),
    ))
}
