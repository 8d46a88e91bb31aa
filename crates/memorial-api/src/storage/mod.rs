//! Local filesystem image store
//!
//! Uploads land under `<upload_dir>/<folder>/<uuid>.<ext>` and are served
//! back by the static `/images` route.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use memorial_core::traits::{ImageStore, RepoResult};
use memorial_core::value_objects::{ImageFolder, ImageUpload};
use memorial_core::DomainError;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Image store writing to a local directory
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Upload root, also the directory served under `/images`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the per-folder directories
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for folder in [ImageFolder::Records, ImageFolder::Users] {
            tokio::fs::create_dir_all(self.root.join(folder.as_str())).await?;
        }
        Ok(())
    }

    fn path(&self, folder: ImageFolder, filename: &str) -> RepoResult<PathBuf> {
        // Only bare generated names are accepted
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(DomainError::ValidationError(format!(
                "Invalid image name: {filename}"
            )));
        }
        Ok(self.root.join(folder.as_str()).join(filename))
    }
}

fn storage_error(e: std::io::Error) -> DomainError {
    DomainError::InternalError(format!("Image storage failed: {e}"))
}

#[async_trait]
impl ImageStore for LocalImageStore {
    #[instrument(skip(self, upload), fields(bytes = upload.len()))]
    async fn save(&self, folder: ImageFolder, upload: &ImageUpload) -> RepoResult<String> {
        let format = upload.format().ok_or_else(|| {
            DomainError::ValidationError("Only png, jpg or jpeg images are accepted".to_string())
        })?;
        let filename = format!("{}.{}", Uuid::new_v4(), format.extension());
        let path = self.path(folder, &filename)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(storage_error)?;
        }
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(storage_error)?;

        debug!(path = %path.display(), "Image stored");
        Ok(filename)
    }

    #[instrument(skip(self))]
    async fn remove(&self, folder: ImageFolder, filename: &str) -> RepoResult<()> {
        let path = self.path(folder, filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}
