use serde::{Deserialize, Serialize};

use crate::domain::models::file::StoredFile;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfoResponse {
    pub name: String,
    #[serde(rename = "sizeInBytes")]
    pub size_in_bytes: u64,
}

impl From<StoredFile> for FileInfoResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            name: file.name,
            size_in_bytes: file.size,
        }
    }
}
