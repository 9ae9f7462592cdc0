use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use cloud_file_upload::config::AppConfig;
use cloud_file_upload::services::registry::FileRegistry;
use cloud_file_upload::services::storage::{StorageService, UploadResult};
use cloud_file_upload::{AppState, create_app};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncRead;
use tower::ServiceExt;

/// Fake signer: records each presign request, optionally refusing them all.
#[derive(Default)]
struct RecordingSigner {
    presigns: Mutex<Vec<(String, u64)>>,
    fail: bool,
}

#[async_trait]
impl StorageService for RecordingSigner {
    async fn upload_stream<'a>(
        &self,
        _key: &str,
        _content_type: &str,
        _reader: Box<dyn AsyncRead + Unpin + Send + 'a>,
    ) -> Result<UploadResult> {
        anyhow::bail!("uploads are not under test here");
    }

    async fn presign_download(&self, key: &str, expires_in: Duration) -> Result<String> {
        if self.fail {
            anyhow::bail!("no such key: {key}");
        }

        self.presigns
            .lock()
            .unwrap()
            .push((key.to_string(), expires_in.as_secs()));

        Ok(format!(
            "https://test-bucket.s3.us-east-1.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=abc",
            key,
            expires_in.as_secs()
        ))
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://test-bucket.s3.us-east-1.amazonaws.com/{}", key)
    }
}

fn test_state(storage: Arc<RecordingSigner>) -> AppState {
    AppState {
        storage,
        registry: Arc::new(FileRegistry::new()),
        config: AppConfig {
            region: "us-east-1".to_string(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            bucket: "test-bucket".to_string(),
            max_upload_size: 1024 * 1024,
        },
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn download_issues_a_60_second_signed_url() {
    let storage = Arc::new(RecordingSigner::default());
    let app = create_app(test_state(storage.clone()));

    let response = app
        .oneshot(Request::get("/download/a.txt").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let url = json["downloadUrl"].as_str().unwrap();
    assert!(url.starts_with("https://"));

    // The provider was asked for exactly one URL with a 60 second expiry.
    let presigns = storage.presigns.lock().unwrap();
    assert_eq!(presigns.as_slice(), &[("a.txt".to_string(), 60)]);
}

#[tokio::test]
async fn signer_failure_maps_to_generic_download_error() {
    let storage = Arc::new(RecordingSigner {
        fail: true,
        ..Default::default()
    });
    let app = create_app(test_state(storage));

    let response = app
        .clone()
        .oneshot(
            Request::get("/download/missing.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Download link error");

    // A failed presign never touches the registry.
    let response = app
        .oneshot(Request::get("/files").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json, serde_json::json!([]));
}
