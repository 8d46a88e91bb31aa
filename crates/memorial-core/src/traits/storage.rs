//! Image storage port

use async_trait::async_trait;

use crate::value_objects::{ImageFolder, ImageUpload};

use super::RepoResult;

/// Persists uploaded images and hands back the filename records refer to
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an upload whose format has already been checked
    async fn save(&self, folder: ImageFolder, upload: &ImageUpload) -> RepoResult<String>;

    /// Remove a stored file; a missing file is not an error
    async fn remove(&self, folder: ImageFolder, filename: &str) -> RepoResult<()>;
}
