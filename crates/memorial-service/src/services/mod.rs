//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod access;
pub mod auth;
pub mod context;
pub mod error;
pub mod memorial;
pub mod search;
mod uploads;
pub mod user;

// Re-export all services for convenience
pub use access::AccessService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use memorial::MemorialService;
pub use search::SearchService;
pub use user::UserService;
