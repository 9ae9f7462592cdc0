pub mod config;
pub mod error;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::services::registry::FileRegistry;
use crate::services::storage::StorageService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::files::upload_file,
        handlers::files::list_files,
        handlers::files::download_url,
    ),
    components(
        schemas(
            models::UploadedFile,
            models::UploadResponse,
            models::DownloadUrlResponse,
        )
    ),
    tags(
        (name = "files", description = "Upload, listing and signed download URLs")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub registry: Arc<FileRegistry>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    let max_upload_size = state.config.max_upload_size;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::ui::index))
        .route("/upload", post(handlers::files::upload_file))
        .route("/files", get(handlers::files::list_files))
        .route("/download/:file_name", get(handlers::files::download_url))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(max_upload_size))
        .with_state(state)
}
