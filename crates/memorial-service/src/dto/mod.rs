//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CommentRequest, EditUserRequest, LoginRequest, ProfileEdit, RecordForm, RegisterRequest,
    Registration, SearchParams,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, AutocompleteResponse, CommentsResponse, CreatedRecordResponse, HealthChecks,
    HealthResponse, MessageResponse, OwnedRecordsResponse, ReadinessResponse,
    RecordListResponse, RecordResponse, SearchHit, SearchResponse, SuggestionItem,
    SuggestionsResponse, UserEnvelope, UserResponse,
};
