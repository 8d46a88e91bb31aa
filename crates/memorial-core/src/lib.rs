//! # memorial-core
//!
//! Domain layer containing entities, value objects, repository traits and the
//! record search algorithm. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod search;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, MemorialRecord, OptionalDetails, RequiredDetails, UserAccount, UserSnapshot,
    MAX_COMMENT_LENGTH, MAX_IMAGES,
};
pub use error::DomainError;
pub use search::{SearchField, SearchQuery, Searchable};
pub use traits::{ImageStore, MemorialRepository, RepoResult, UserRepository};
pub use value_objects::{
    BurialType, IdParseError, ImageFolder, ImageFormat, ImageUpload, RecordId, UserId,
};
