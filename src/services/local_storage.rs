use std::{
    io,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tracing::{debug, info, warn};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::models::file::{FileData, FileResource, StoredFile},
    services::error::StorageError,
};

const UNNAMED: &str = "unnamed";

/// Filesystem-backed upload store.
///
/// The directory listing under `root` is the catalog: nothing is indexed in
/// memory. Collision resolution in [`LocalStorageService::store`] is a probe
/// followed by a write, so two concurrent stores of the same name may pick
/// the same free suffix and the later write wins. Listing followed by a
/// per-item action is likewise not atomic against other callers.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    /// Resolves `upload_dir` to an absolute, normalized path. The directory
    /// itself is created lazily by the first operation.
    pub fn new(upload_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let absolute = std::path::absolute(upload_dir.as_ref())?;
        Ok(Self {
            root: normalize_path(&absolute),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn upload_root(&self) -> Result<&Path, StorageError> {
        // create_dir_all tolerates the directory appearing concurrently
        fs::create_dir_all(&self.root).await?;
        Ok(&self.root)
    }

    async fn unique_path(root: &Path, base_name: &str) -> Result<PathBuf, StorageError> {
        let target = root.join(base_name);
        if !path_exists(&target).await? {
            return Ok(target);
        }

        let (stem, extension) = split_extension(base_name);
        let mut counter: u64 = 1;
        loop {
            let candidate = root.join(format!("{}_{}{}", stem, counter, extension));
            if !path_exists(&candidate).await? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    fn ensure_inside_root(&self, path: &Path) -> Result<PathBuf, StorageError> {
        let normalized = normalize_path(path);
        if !normalized.starts_with(&self.root) {
            warn!("Rejected path outside upload root: {}", path.display());
            return Err(StorageError::InvalidName("Invalid file name".to_string()));
        }
        Ok(normalized)
    }

    /// Confines `file_name` to the root and requires it to name an existing
    /// regular file.
    async fn resolve_existing(
        &self,
        file_name: &str,
    ) -> Result<(PathBuf, std::fs::Metadata), StorageError> {
        reject_nul(file_name)?;
        let root = self.upload_root().await?;
        let path = self.ensure_inside_root(&root.join(file_name))?;

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok((path, metadata)),
            Ok(_) => Err(not_found(file_name)),
            Err(e) => {
                debug!("Metadata lookup failed for {}: {}", path.display(), e);
                Err(not_found(file_name))
            }
        }
    }

    pub async fn store_file(&self, file_data: FileData) -> Result<StoredFile, StorageError> {
        let original_name = file_data
            .filename
            .as_deref()
            .ok_or_else(|| StorageError::InvalidName("File name is required".to_string()))?;
        reject_nul(original_name)?;

        let root = self.upload_root().await?;
        let base_name = sanitize_file_name(original_name);
        let target = Self::unique_path(root, &base_name).await?;

        fs::write(&target, &file_data.content).await?;
        let size = fs::metadata(&target).await?.len();
        let name = file_name_of(&target, &base_name);

        info!("Stored file: {} ({} bytes)", name, size);
        Ok(StoredFile { name, size })
    }

    pub async fn list_files(&self) -> Result<Vec<StoredFile>, StorageError> {
        let root = self.upload_root().await?;
        let mut entries = fs::read_dir(root).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let metadata = match fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            files.push(StoredFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
            });
        }

        Ok(files)
    }

    pub async fn open_file(&self, file_name: &str) -> Result<FileResource, StorageError> {
        let (path, metadata) = self.resolve_existing(file_name).await?;

        let file = File::open(&path).await.map_err(|e| {
            warn!("Cannot open {}: {}", path.display(), e);
            StorageError::NotFound(format!("Cannot read file: {}", file_name))
        })?;

        Ok(FileResource {
            name: file_name_of(&path, file_name),
            size: metadata.len(),
            file,
        })
    }

    pub async fn delete_file(&self, file_name: &str) -> Result<(), StorageError> {
        let (path, _) = self.resolve_existing(file_name).await?;

        fs::remove_file(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => not_found(file_name),
            _ => StorageError::Io(e),
        })?;

        info!("Deleted file: {}", file_name);
        Ok(())
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn store(&self, file_data: FileData) -> Result<StoredFile, ApplicationError> {
        Ok(self.store_file(file_data).await?)
    }

    async fn list_all(&self) -> Result<Vec<StoredFile>, ApplicationError> {
        Ok(self.list_files().await?)
    }

    async fn load_as_resource(&self, file_name: &str) -> Result<FileResource, ApplicationError> {
        Ok(self.open_file(file_name).await?)
    }

    async fn delete(&self, file_name: &str) -> Result<(), ApplicationError> {
        Ok(self.delete_file(file_name).await?)
    }
}

/// Reduces a client-supplied name to a bare, non-empty file name that
/// contains neither `/` nor `\` and is not `.` or `..`.
fn sanitize_file_name(original_name: &str) -> String {
    if original_name.trim().is_empty() {
        return UNNAMED.to_string();
    }

    let last_segment = Path::new(original_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name: String = last_segment
        .chars()
        .filter(|c| *c != '/' && *c != '\\')
        .collect();

    if name.trim().is_empty() || name == "." || name == ".." {
        return UNNAMED.to_string();
    }
    name
}

/// Lexically normalizes a path: drops `.` components and folds `..` into
/// the preceding component. `..` never climbs above the root directory.
/// Symbolic links are not resolved.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let can_pop = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if can_pop {
                    normalized.pop();
                } else if !at_root {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Splits at the last `.` unless it is the leading character, so `.env`
/// has no extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    }
}

async fn path_exists(path: &Path) -> Result<bool, StorageError> {
    // symlink_metadata so that a dangling link still counts as taken
    match fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn file_name_of(path: &Path, fallback: &str) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

fn reject_nul(file_name: &str) -> Result<(), StorageError> {
    if file_name.contains('\0') {
        warn!("Rejected file name containing NUL: {:?}", file_name);
        return Err(StorageError::InvalidName("Invalid file name".to_string()));
    }
    Ok(())
}

fn not_found(file_name: &str) -> StorageError {
    StorageError::NotFound(format!("File not found: {}", file_name))
}
