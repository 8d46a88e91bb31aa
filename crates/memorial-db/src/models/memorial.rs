//! Memorial record database model

use chrono::{DateTime, Utc};
use memorial_core::entities::{Comment, UserSnapshot};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for memorials table
///
/// The folded `*_search` columns are write-only from Rust's point of view and
/// are not selected back.
#[derive(Debug, Clone, FromRow)]
pub struct MemorialModel {
    pub id: Uuid,
    pub legacy_id: Option<String>,
    pub name: String,
    pub plaque: String,
    pub death_date: String,
    pub birth_date: String,
    pub age: String,
    pub block: String,
    pub mother: String,
    pub father: String,
    pub cemetery: Option<String>,
    pub street: Option<String>,
    pub nationality: Option<String>,
    pub burial_type: Option<String>,
    pub epitaph: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Vec<String>,
    pub comments: Json<Vec<Comment>>,
    pub available: bool,
    pub owner: Json<UserSnapshot>,
    pub adopter: Option<Json<UserSnapshot>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

