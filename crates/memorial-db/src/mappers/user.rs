//! User entity <-> model mapper

use memorial_core::entities::UserAccount;
use memorial_core::value_objects::UserId;
use uuid::Uuid;

use crate::models::UserModel;

/// Convert UserModel to UserAccount entity, leaving the hash behind
impl From<UserModel> for UserAccount {
    fn from(model: UserModel) -> Self {
        UserAccount {
            id: UserId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            cpf: model.cpf,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Values for inserting a user row
pub struct UserInsert<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub cpf: &'a str,
    pub password_hash: &'a str,
    pub image: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a UserAccount, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            name: &user.name,
            email: &user.email,
            phone: &user.phone,
            cpf: &user.cpf,
            password_hash,
            image: user.image.as_deref(),
        }
    }
}
