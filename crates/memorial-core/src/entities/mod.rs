//! Domain entities - core business objects

mod memorial;
mod user;

pub use memorial::{
    Comment, MemorialRecord, OptionalDetails, RequiredDetails, MAX_COMMENT_LENGTH, MAX_IMAGES,
};
pub use user::{UserAccount, UserSnapshot};
