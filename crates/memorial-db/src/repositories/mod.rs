//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in memorial-core.

mod error;
mod memorial;
mod user;

pub use memorial::PgMemorialRepository;
pub use user::PgUserRepository;
