use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::fs::File;

#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Bytes,
    pub filename: Option<String>,
}

impl FileData {
    pub fn new(content: impl Into<Bytes>, filename: Option<String>) -> Self {
        Self {
            content: content.into(),
            filename,
        }
    }
}

/// A file resident directly under the upload root. The size is read from
/// filesystem metadata on every listing, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
}

/// An open, readable stored file. The underlying handle is closed when the
/// resource is dropped.
#[derive(Debug)]
pub struct FileResource {
    pub name: String,
    pub size: u64,
    pub file: File,
}
