//! Multipart form extractor
//!
//! Collects the text fields of a `multipart/form-data` body into a request
//! DTO and the parts of its file field into [`ImageUpload`]s.

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, Multipart, Request},
};
use memorial_core::value_objects::ImageUpload;
use memorial_service::dto::{EditUserRequest, RecordForm};
use tracing::debug;

use crate::response::ApiError;
use crate::state::AppState;

/// A DTO that can be filled field by field from a multipart body
pub trait FormFields: Default + Send {
    /// Name of the part carrying uploaded files
    const FILE_FIELD: &'static str;

    /// Set a text field; unknown names are ignored
    fn set_field(&mut self, name: &str, value: String);
}

impl FormFields for RecordForm {
    const FILE_FIELD: &'static str = "images";

    fn set_field(&mut self, name: &str, value: String) {
        RecordForm::set_field(self, name, value);
    }
}

impl FormFields for EditUserRequest {
    const FILE_FIELD: &'static str = "image";

    fn set_field(&mut self, name: &str, value: String) {
        EditUserRequest::set_field(self, name, value);
    }
}

/// Text fields plus uploaded files of a multipart request
#[derive(Debug)]
pub struct MultipartForm<T> {
    pub fields: T,
    pub files: Vec<ImageUpload>,
}

#[async_trait]
impl<S, T> FromRequest<S> for MultipartForm<T>
where
    S: Send + Sync,
    T: FormFields,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let max_mb = AppState::from_ref(state).config().storage.max_file_size_mb;
        let max_bytes = (max_mb as usize) * 1024 * 1024;

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let mut fields = T::default();
        let mut files = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == T::FILE_FIELD {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;

                // Browsers send an empty part when no file was picked
                if bytes.is_empty() {
                    continue;
                }
                if bytes.len() > max_bytes {
                    return Err(ApiError::unprocessable(format!(
                        "Images must be at most {max_mb} MB"
                    )));
                }
                files.push(ImageUpload::new(content_type, bytes.to_vec()));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                fields.set_field(&name, value);
            }
        }

        debug!(files = files.len(), "Multipart form read");
        Ok(Self { fields, files })
    }
}
