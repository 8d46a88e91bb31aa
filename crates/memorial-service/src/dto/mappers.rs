//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use memorial_core::entities::{MemorialRecord, UserAccount};

use super::responses::{RecordResponse, SearchHit, SuggestionItem, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&UserAccount> for UserResponse {
    fn from(user: &UserAccount) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            cpf: user.cpf.clone(),
            image: user.image.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserAccount> for UserResponse {
    fn from(user: UserAccount) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Record Mappers
// ============================================================================

impl From<MemorialRecord> for RecordResponse {
    fn from(record: MemorialRecord) -> Self {
        let owner = record.owner().clone();
        Self {
            id: record.id,
            legacy_id: record.legacy_id,
            name: record.name,
            plaque: record.plaque,
            death_date: record.death_date,
            birth_date: record.birth_date,
            age: record.age,
            block: record.block,
            mother: record.mother,
            father: record.father,
            cemetery: record.cemetery,
            street: record.street,
            nationality: record.nationality,
            burial_type: record.burial_type,
            epitaph: record.epitaph,
            latitude: record.latitude,
            longitude: record.longitude,
            images: record.images,
            comments: record.comments,
            available: record.available,
            owner,
            adopter: record.adopter,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

fn thumbnail(record: &MemorialRecord) -> Vec<String> {
    record.first_image().map(String::from).into_iter().collect()
}

impl From<&MemorialRecord> for SearchHit {
    fn from(record: &MemorialRecord) -> Self {
        Self {
            id: record.id,
            legacy_id: record.legacy_id.clone(),
            name: record.name.clone(),
            street: record.street.clone(),
            block: record.block.clone(),
            plaque: record.plaque.clone(),
            images: thumbnail(record),
            death_date: record.death_date.clone(),
            birth_date: record.birth_date.clone(),
            age: record.age.clone(),
            mother: record.mother.clone(),
            father: record.father.clone(),
            cemetery: record.cemetery.clone(),
            epitaph: record.epitaph.clone(),
        }
    }
}

impl From<&MemorialRecord> for SuggestionItem {
    fn from(record: &MemorialRecord) -> Self {
        Self {
            id: record.id,
            legacy_id: record.legacy_id.clone(),
            name: record.name.clone(),
            street: record.street.clone(),
            block: record.block.clone(),
            plaque: record.plaque.clone(),
            images: thumbnail(record),
        }
    }
}
