//! Mapping from sqlx failures to domain errors

use memorial_core::error::DomainError;
use memorial_core::value_objects::{RecordId, UserId};
use sqlx::Error as SqlxError;

pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Like [`map_db_error`], but a unique-constraint violation becomes `on_unique()`
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    let is_unique = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if is_unique {
        on_unique()
    } else {
        map_db_error(e)
    }
}

/// Raised when an UPDATE or DELETE touched no user row
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id.to_string())
}

/// Raised when an UPDATE or DELETE touched no record row
pub fn record_not_found(id: RecordId) -> DomainError {
    DomainError::RecordNotFound(id.to_string())
}
