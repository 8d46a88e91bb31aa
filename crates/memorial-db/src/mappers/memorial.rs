//! Memorial record entity <-> model mapper

use memorial_core::entities::{MemorialRecord, OptionalDetails, RequiredDetails};
use memorial_core::search::normalize;
use memorial_core::value_objects::{BurialType, RecordId};
use tracing::warn;
use uuid::Uuid;

use crate::models::MemorialModel;

/// Convert MemorialModel to MemorialRecord entity
impl From<MemorialModel> for MemorialRecord {
    fn from(model: MemorialModel) -> Self {
        let burial_type = model.burial_type.as_deref().and_then(|label| {
            let parsed = BurialType::from_label(label);
            if parsed.is_none() {
                warn!(record_id = %model.id, label, "Unknown burial type in storage");
            }
            parsed
        });

        let mut record = MemorialRecord::restore(
            RecordId::from_uuid(model.id),
            RequiredDetails {
                name: model.name,
                plaque: model.plaque,
                death_date: model.death_date,
                birth_date: model.birth_date,
                age: model.age,
                block: model.block,
                mother: model.mother,
                father: model.father,
            },
            OptionalDetails {
                cemetery: model.cemetery,
                street: model.street,
                nationality: model.nationality,
                burial_type,
                epitaph: model.epitaph,
                latitude: model.latitude,
                longitude: model.longitude,
            },
            model.owner.0,
            model.adopter.map(|json| json.0),
            model.images,
            model.comments.0,
            model.available,
            model.created_at,
            model.updated_at,
        );
        record.legacy_id = model.legacy_id;
        record
    }
}

/// Folded copies of the searchable fields
pub struct SearchColumns {
    pub name: String,
    pub street: String,
    pub block: String,
    pub plaque: String,
}

impl SearchColumns {
    pub fn new(record: &MemorialRecord) -> Self {
        Self {
            name: normalize(&record.name),
            street: record.street.as_deref().map(normalize).unwrap_or_default(),
            block: normalize(&record.block),
            plaque: normalize(&record.plaque),
        }
    }
}

/// Derived values bound alongside a record's own fields on insert or rewrite
pub struct MemorialInsert {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub burial_type: Option<&'static str>,
    pub search: SearchColumns,
}

impl MemorialInsert {
    pub fn new(record: &MemorialRecord) -> Self {
        Self {
            id: record.id.into_inner(),
            owner_id: record.owner().id.into_inner(),
            burial_type: record.burial_type.map(BurialType::as_str),
            search: SearchColumns::new(record),
        }
    }
}
