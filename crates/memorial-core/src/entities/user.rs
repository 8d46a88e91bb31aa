//! User entity - an account that can own, adopt and comment on records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Registered account
///
/// The password hash is kept by the repository and never travels with the
/// entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new account with required fields
    pub fn new(id: UserId, name: String, email: String, phone: String, cpf: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            phone,
            cpf,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable profile fields
    pub fn set_profile(&mut self, name: String, email: String, phone: String, cpf: String) {
        self.name = name;
        self.email = email;
        self.phone = phone;
        self.cpf = cpf;
        self.updated_at = Utc::now();
    }

    /// Update the profile image
    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        self.updated_at = Utc::now();
    }

    /// Snapshot embedded as the owner of a record
    pub fn owner_snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            phone: Some(self.phone.clone()),
        }
    }

    /// Snapshot embedded as the adopter of a record
    pub fn adopter_snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            phone: None,
        }
    }
}

/// Copy of a user's public details taken at write time
///
/// Later profile edits do not reach snapshots already stored on records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
