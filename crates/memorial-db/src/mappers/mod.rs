//! Entity to model mappers
//!
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database writes

mod memorial;
mod user;

pub use memorial::{MemorialInsert, SearchColumns};
pub use user::UserInsert;
