use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{FileData, FileResource, StoredFile},
};

/// Operations the HTTP layer invokes on the upload store. Each call is
/// independent; the directory under the upload root is the only state.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn store(&self, file_data: FileData) -> Result<StoredFile, ApplicationError>;
    async fn list_all(&self) -> Result<Vec<StoredFile>, ApplicationError>;
    async fn load_as_resource(&self, file_name: &str) -> Result<FileResource, ApplicationError>;
    async fn delete(&self, file_name: &str) -> Result<(), ApplicationError>;
}
