//! Database models - SQLx-compatible structs for PostgreSQL tables

mod memorial;
mod user;

pub use memorial::MemorialModel;
pub use user::UserModel;
