use axum::extract::FromRef;
use std::sync::Arc;

use crate::application::services::StorageService;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub storage_service: Arc<dyn StorageService>,
}

impl AppState {
    pub fn new(storage_service: Arc<dyn StorageService>) -> Self {
        Self { storage_service }
    }
}
