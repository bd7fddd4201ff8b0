use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    adapters::{controllers::file_controller::FileController, state::AppState},
    domain::config::server::ServerConfig,
};

pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route(
            "/api/files",
            get(FileController::list_files).post(FileController::upload_file),
        )
        .route(
            "/api/files/{file_name}",
            get(FileController::download_file).delete(FileController::delete_file),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_size))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
