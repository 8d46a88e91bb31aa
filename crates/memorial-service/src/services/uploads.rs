//! Image upload handling shared by record and profile edits

use memorial_core::value_objects::{ImageFolder, ImageUpload};
use memorial_core::MAX_IMAGES;
use tracing::warn;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Check every upload before anything is written
pub(crate) fn check_uploads(uploads: &[ImageUpload]) -> ServiceResult<()> {
    if uploads.len() > MAX_IMAGES {
        return Err(ServiceError::validation(format!(
            "At most {MAX_IMAGES} images are allowed"
        )));
    }
    if uploads.iter().any(|upload| upload.format().is_none()) {
        return Err(ServiceError::validation(
            "Only png, jpg or jpeg images are accepted",
        ));
    }
    Ok(())
}

/// Store already-checked uploads, returning their filenames in upload order
///
/// If one save fails the files written before it are removed again.
pub(crate) async fn store_all(
    ctx: &ServiceContext,
    folder: ImageFolder,
    uploads: &[ImageUpload],
) -> ServiceResult<Vec<String>> {
    let mut names = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match ctx.image_store().save(folder, upload).await {
            Ok(name) => names.push(name),
            Err(e) => {
                discard(ctx, folder, &names).await;
                return Err(e.into());
            }
        }
    }
    Ok(names)
}

/// Remove files no longer referenced; failures are logged and skipped
pub(crate) async fn discard(ctx: &ServiceContext, folder: ImageFolder, names: &[String]) {
    for name in names {
        if let Err(e) = ctx.image_store().remove(folder, name).await {
            warn!(folder = %folder, file = %name, error = %e, "Failed to remove image");
        }
    }
}
