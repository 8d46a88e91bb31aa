//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Record not found")]
    RecordNotFound(String),

    #[error("User not found")]
    UserNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the owner can modify this record")]
    NotRecordOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("You are already responsible for this record")]
    CannotAdoptOwnRecord,

    #[error("You have already requested to adopt this record")]
    AlreadyAdopter,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("{0}")]
    DatabaseError(String),

    #[error("{0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::RecordNotFound(_) => "UNKNOWN_RECORD",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::EmptyComment => "EMPTY_COMMENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotRecordOwner => "NOT_RECORD_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Business Rules
            Self::CannotAdoptOwnRecord => "CANNOT_ADOPT_OWN_RECORD",
            Self::AlreadyAdopter => "ALREADY_ADOPTER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound(_) | Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingField(_)
                | Self::InvalidId(_)
                | Self::InvalidEmail
                | Self::PasswordMismatch
                | Self::EmptyComment
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotRecordOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::CannotAdoptOwnRecord | Self::AlreadyAdopter)
    }
}
