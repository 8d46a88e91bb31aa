//! Repository and storage traits

mod repositories;
mod storage;

pub use repositories::{MemorialRepository, RepoResult, UserRepository};
pub use storage::ImageStore;
