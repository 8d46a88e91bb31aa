//! Value objects - immutable types that represent domain concepts

mod burial_type;
mod ids;
mod image;

pub use burial_type::BurialType;
pub use ids::{IdParseError, RecordId, UserId};
pub use image::{ImageFolder, ImageFormat, ImageUpload};
