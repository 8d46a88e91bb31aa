//! Axum extractors for request handling
//!
//! Custom extractors for authentication, JSON bodies and multipart forms.

mod auth;
mod json;
mod multipart;

pub use auth::{AuthUser, OptionalAuthUser};
pub use json::JsonBody;
pub use multipart::{FormFields, MultipartForm};
