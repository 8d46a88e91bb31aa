//! Memorial record entity - a deceased person's burial-site entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSnapshot;
use crate::error::DomainError;
use crate::value_objects::{BurialType, RecordId, UserId};

/// Maximum number of images attached to a record
pub const MAX_IMAGES: usize = 5;

/// Maximum comment length in characters
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Biographical fields every record must carry
///
/// Dates and age are kept verbatim as typed by the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredDetails {
    pub name: String,
    pub plaque: String,
    pub death_date: String,
    pub birth_date: String,
    pub age: String,
    pub block: String,
    pub mother: String,
    pub father: String,
}

/// Optional descriptive fields
///
/// `None` means "not supplied": on update the stored value is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionalDetails {
    pub cemetery: Option<String>,
    pub street: Option<String>,
    pub nationality: Option<String>,
    pub burial_type: Option<BurialType>,
    pub epitaph: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Public comment left on a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "nome")]
    pub author_name: String,
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "data")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment, trimming and bounding the message
    pub fn new(author_name: String, message: &str) -> Result<Self, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::EmptyComment);
        }
        if message.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_COMMENT_LENGTH,
            });
        }
        Ok(Self {
            author_name,
            message: message.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Memorial record
#[derive(Debug, Clone, PartialEq)]
pub struct MemorialRecord {
    pub id: RecordId,
    /// Alternate identifier carried over from older data
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
    pub burial_type: Option<BurialType>,
    pub epitaph: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Vec<String>,
    pub comments: Vec<Comment>,
    pub available: bool,
    owner: UserSnapshot,
    pub adopter: Option<UserSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemorialRecord {
    /// Create a new record owned by `owner`, open for adoption
    pub fn new(
        id: RecordId,
        required: RequiredDetails,
        optional: OptionalDetails,
        owner: UserSnapshot,
        images: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        let mut record = Self {
            id,
            legacy_id: None,
            name: String::new(),
            plaque: String::new(),
            death_date: String::new(),
            birth_date: String::new(),
            age: String::new(),
            block: String::new(),
            mother: String::new(),
            father: String::new(),
            cemetery: None,
            street: None,
            nationality: None,
            burial_type: None,
            epitaph: None,
            latitude: None,
            longitude: None,
            images: Vec::new(),
            comments: Vec::new(),
            available: true,
            owner,
            adopter: None,
            created_at: now,
            updated_at: now,
        };
        record.set_required(required);
        record.merge_optional(optional);
        record.images = images.into_iter().take(MAX_IMAGES).collect();
        record
    }

    /// Rebuild a record from storage, owner included
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: RecordId,
        required: RequiredDetails,
        optional: OptionalDetails,
        owner: UserSnapshot,
        adopter: Option<UserSnapshot>,
        images: Vec<String>,
        comments: Vec<Comment>,
        available: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut record = Self::new(id, required, optional, owner, Vec::new());
        record.images = images;
        record.comments = comments;
        record.available = available;
        record.adopter = adopter;
        record.created_at = created_at;
        record.updated_at = updated_at;
        record
    }

    /// Owner snapshot, fixed at creation
    #[inline]
    pub fn owner(&self) -> &UserSnapshot {
        &self.owner
    }

    /// Check whether `user_id` owns this record
    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner.id == user_id
    }

    /// First image, used as the thumbnail in listings
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Apply an edit from the owner
    ///
    /// Required fields are always replaced, optional ones only when supplied,
    /// and a non-empty image list replaces the current one.
    pub fn apply_update(
        &mut self,
        required: RequiredDetails,
        optional: OptionalDetails,
        images: Vec<String>,
    ) {
        self.set_required(required);
        self.merge_optional(optional);
        if !images.is_empty() {
            self.images = images.into_iter().take(MAX_IMAGES).collect();
        }
        self.updated_at = Utc::now();
    }

    /// Register `adopter` as the account asking to look after this record
    ///
    /// Returns the adopter that was replaced, if any.
    pub fn request_adoption(
        &mut self,
        adopter: UserSnapshot,
    ) -> Result<Option<UserSnapshot>, DomainError> {
        if self.is_owned_by(adopter.id) {
            return Err(DomainError::CannotAdoptOwnRecord);
        }
        if self.adopter.as_ref().is_some_and(|a| a.id == adopter.id) {
            return Err(DomainError::AlreadyAdopter);
        }
        self.updated_at = Utc::now();
        Ok(self.adopter.replace(adopter))
    }

    /// Close the record for adoption
    pub fn conclude_adoption(&mut self) {
        self.available = false;
        self.updated_at = Utc::now();
    }

    /// Append a public comment
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.updated_at = Utc::now();
    }

    fn set_required(&mut self, required: RequiredDetails) {
        let RequiredDetails {
            name,
            plaque,
            death_date,
            birth_date,
            age,
            block,
            mother,
            father,
        } = required;
        self.name = name;
        self.plaque = plaque;
        self.death_date = death_date;
        self.birth_date = birth_date;
        self.age = age;
        self.block = block;
        self.mother = mother;
        self.father = father;
    }

    fn merge_optional(&mut self, optional: OptionalDetails) {
        if optional.cemetery.is_some() {
            self.cemetery = optional.cemetery;
        }
        if optional.street.is_some() {
            self.street = optional.street;
        }
        if optional.nationality.is_some() {
            self.nationality = optional.nationality;
        }
        if optional.burial_type.is_some() {
            self.burial_type = optional.burial_type;
        }
        if optional.epitaph.is_some() {
            self.epitaph = optional.epitaph;
        }
        if optional.latitude.is_some() {
            self.latitude = optional.latitude;
        }
        if optional.longitude.is_some() {
            self.longitude = optional.longitude;
        }
    }
}
