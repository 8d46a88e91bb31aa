//! # memorial-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    AccessService, AuthService, MemorialService, SearchService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
