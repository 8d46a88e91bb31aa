//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names follow
//! the wire format the web client already reads (`nome`, `dtFal`, `_id`, ...).

use chrono::{DateTime, Utc};
use memorial_core::entities::{Comment, UserSnapshot};
use memorial_core::value_objects::{BurialType, RecordId, UserId};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Issued token after registration or login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, token: String, user_id: UserId) -> Self {
        Self {
            message: message.into(),
            token,
            user_id,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Account profile, never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// `{user: ...}` envelope of the profile lookup
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

// ============================================================================
// Record Responses
// ============================================================================

/// Full memorial record
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "chapa")]
    pub plaque: String,
    #[serde(rename = "dtFal")]
    pub death_date: String,
    #[serde(rename = "dtNasc")]
    pub birth_date: String,
    #[serde(rename = "idade")]
    pub age: String,
    #[serde(rename = "quadra")]
    pub block: String,
    #[serde(rename = "mae")]
    pub mother: String,
    #[serde(rename = "pai")]
    pub father: String,
    #[serde(rename = "cemiterio")]
    pub cemetery: Option<String>,
    #[serde(rename = "rua")]
    pub street: Option<String>,
    #[serde(rename = "nacionalidade")]
    pub nationality: Option<String>,
    #[serde(rename = "tipoSepultura")]
    pub burial_type: Option<BurialType>,
    #[serde(rename = "epitafio")]
    pub epitaph: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Vec<String>,
    #[serde(rename = "comentarios")]
    pub comments: Vec<Comment>,
    pub available: bool,
    #[serde(rename = "user")]
    pub owner: UserSnapshot,
    pub adopter: Option<UserSnapshot>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Response of record creation
#[derive(Debug, Clone, Serialize)]
pub struct CreatedRecordResponse {
    pub message: String,
    #[serde(rename = "newSepultado")]
    pub record: RecordResponse,
}

/// `{sepultado: [...]}` listing of the latest records
#[derive(Debug, Clone, Serialize)]
pub struct RecordListResponse {
    #[serde(rename = "sepultado")]
    pub records: Vec<RecordResponse>,
}

/// `{sepults: [...]}` listing of the caller's records
#[derive(Debug, Clone, Serialize)]
pub struct OwnedRecordsResponse {
    #[serde(rename = "sepults")]
    pub records: Vec<RecordResponse>,
}

/// Comment list after a new comment was appended
#[derive(Debug, Clone, Serialize)]
pub struct CommentsResponse {
    pub message: String,
    #[serde(rename = "comentarios")]
    pub comments: Vec<Comment>,
}

// ============================================================================
// Search Responses
// ============================================================================

/// Search result projection
///
/// `images` holds the first image only.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "rua")]
    pub street: Option<String>,
    #[serde(rename = "quadra")]
    pub block: String,
    #[serde(rename = "chapa")]
    pub plaque: String,
    pub images: Vec<String>,
    #[serde(rename = "dtFal")]
    pub death_date: String,
    #[serde(rename = "dtNasc")]
    pub birth_date: String,
    #[serde(rename = "idade")]
    pub age: String,
    #[serde(rename = "mae")]
    pub mother: String,
    #[serde(rename = "pai")]
    pub father: String,
    #[serde(rename = "cemiterio")]
    pub cemetery: Option<String>,
    #[serde(rename = "epitafio")]
    pub epitaph: Option<String>,
}

/// Suggestion projection, the smaller cousin of [`SearchHit`]
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionItem {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "rua")]
    pub street: Option<String>,
    #[serde(rename = "quadra")]
    pub block: String,
    #[serde(rename = "chapa")]
    pub plaque: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "sepultado")]
    pub results: Vec<SearchHit>,
    pub total: usize,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SuggestionItem>,
    pub total: usize,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

impl SuggestionsResponse {
    pub fn empty(search_term: impl Into<String>) -> Self {
        Self {
            suggestions: Vec::new(),
            total: 0,
            search_term: search_term.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AutocompleteResponse {
    pub autocomplete: Vec<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_serialization() {
        let user_id = UserId::generate();
        let response = AuthResponse::new("Welcome", "tok".to_string(), user_id);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "tok");
        assert_eq!(json["userId"], user_id.to_string());
        assert_eq!(json["message"], "Welcome");
    }

    #[test]
    fn test_suggestions_empty() {
        let json = serde_json::to_value(SuggestionsResponse::empty("a")).unwrap();
        assert_eq!(json["suggestions"], serde_json::json!([]));
        assert_eq!(json["total"], 0);
        assert_eq!(json["searchTerm"], "a");
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        assert!(ReadinessResponse::ready(true).is_ready());

        let down = ReadinessResponse::ready(false);
        assert!(!down.is_ready());
        assert_eq!(down.checks.database, "unhealthy");
    }
}
