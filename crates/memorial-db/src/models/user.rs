//! Row type for the `users` table

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile columns of a `users` row
///
/// The password hash is not part of it; only
/// [`crate::PgUserRepository`] reads that column, on its own.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
