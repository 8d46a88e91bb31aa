//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Comment, MemorialRecord, UserAccount, UserSnapshot};
use crate::error::DomainError;
use crate::search::{SearchField, SearchQuery};
use crate::value_objects::{RecordId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<UserAccount>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserAccount>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &UserAccount, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &UserAccount) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Memorial Repository
// ============================================================================

#[async_trait]
pub trait MemorialRepository: Send + Sync {
    /// Find record by native ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<MemorialRecord>>;

    /// Find record by its legacy identifier
    async fn find_by_legacy_id(&self, legacy_id: &str) -> RepoResult<Option<MemorialRecord>>;

    /// Most recently created records, newest first
    async fn find_latest(&self, limit: i64) -> RepoResult<Vec<MemorialRecord>>;

    /// All records owned by a user, newest first
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<MemorialRecord>>;

    /// Records where every query term occurs in name, street, block or plaque
    ///
    /// Ordered like [`crate::search::rank`] (score, then folded name, then
    /// name) before the first `limit` rows are taken.
    async fn search(&self, query: &SearchQuery, limit: usize) -> RepoResult<Vec<MemorialRecord>>;

    /// Records whose name contains the query, prefix matches first, then by name
    async fn suggest_by_name(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> RepoResult<Vec<MemorialRecord>>;

    /// Distinct trimmed values of `field` containing the query, ordered by
    /// folded form
    async fn distinct_values(
        &self,
        field: SearchField,
        query: &SearchQuery,
        limit: usize,
    ) -> RepoResult<Vec<String>>;

    /// Create a new record
    async fn create(&self, record: &MemorialRecord) -> RepoResult<()>;

    /// Persist biographical fields and images of an existing record
    async fn update_details(&self, record: &MemorialRecord) -> RepoResult<()>;

    /// Replace the adopter snapshot
    async fn set_adopter(&self, id: RecordId, adopter: &UserSnapshot) -> RepoResult<()>;

    /// Change adoption availability
    async fn set_available(&self, id: RecordId, available: bool) -> RepoResult<()>;

    /// Append a comment, returning the full comment list
    async fn add_comment(&self, id: RecordId, comment: &Comment) -> RepoResult<Vec<Comment>>;

    /// Permanently delete a record
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}
