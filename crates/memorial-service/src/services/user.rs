//! User service
//!
//! Handles profile lookups and profile edits.

use memorial_core::value_objects::{ImageFolder, ImageUpload, UserId};
use memorial_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{EditUserRequest, MessageResponse, UserEnvelope, UserResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::uploads;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get an account's public profile
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> ServiceResult<UserEnvelope> {
        let user_id = UserId::parse(id).map_err(|_| DomainError::InvalidId(id.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        Ok(UserEnvelope {
            user: UserResponse::from(&user),
        })
    }

    /// Edit the caller's own profile
    ///
    /// The target is always `caller`; whatever id the route carried is not
    /// consulted.
    #[instrument(skip(self, request, image))]
    pub async fn edit_user(
        &self,
        caller: UserId,
        request: EditUserRequest,
        image: Option<ImageUpload>,
    ) -> ServiceResult<MessageResponse> {
        let mut user = AccessService::new(self.ctx).caller(caller).await?;
        let edit = request.checked()?;

        if edit.email != user.email && self.ctx.user_repo().email_exists(&edit.email).await? {
            warn!(user_id = %caller, "Profile edit rejected: email already in use");
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let uploads: Vec<ImageUpload> = image.into_iter().collect();
        uploads::check_uploads(&uploads)?;

        let new_hash = edit
            .new_password
            .as_deref()
            .map(|password| self.ctx.password_service().hash(password))
            .transpose()?;

        let previous_image = user.image.clone();
        let stored = uploads::store_all(self.ctx, ImageFolder::Users, &uploads).await?;
        let replaced_image = stored.into_iter().next();
        if let Some(name) = &replaced_image {
            user.set_image(Some(name.clone()));
        }

        user.set_profile(edit.name, edit.email, edit.phone, edit.cpf);
        if let Err(e) = self.ctx.user_repo().update(&user).await {
            if let Some(name) = replaced_image {
                uploads::discard(self.ctx, ImageFolder::Users, &[name]).await;
            }
            return Err(e.into());
        }

        if let Some(hash) = new_hash {
            self.ctx.user_repo().update_password(caller, &hash).await?;
            info!(user_id = %caller, "Password changed");
        }

        if let (Some(_), Some(old)) = (&replaced_image, previous_image) {
            uploads::discard(self.ctx, ImageFolder::Users, &[old]).await;
        }

        info!(user_id = %caller, "Profile updated");
        Ok(MessageResponse::new("Profile updated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{png, Fixture};
    use memorial_common::PasswordService;

    fn edit(name: &str, email: &str) -> EditUserRequest {
        EditUserRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some("5511888880000".to_string()),
            cpf: Some("98765432100".to_string()),
            password: None,
            confirmpassword: None,
        }
    }

    #[tokio::test]
    async fn test_get_user() {
        let fx = Fixture::new();
        let user = fx.user("Ana").await;
        let users = UserService::new(&fx.ctx);

        let found = users.get_user(&user.id.to_string()).await.unwrap();
        assert_eq!(found.user.email, user.email);

        let malformed = users.get_user("abc").await.unwrap_err();
        assert_eq!(malformed.status_code(), 422);

        let missing = users
            .get_user(&UserId::generate().to_string())
            .await
            .unwrap_err();
        assert_eq!(missing.status_code(), 404);
    }

    #[tokio::test]
    async fn test_edit_keeps_password_unless_requested() {
        let fx = Fixture::new();
        let user = fx.user("Ana").await;
        let users = UserService::new(&fx.ctx);

        users
            .edit_user(user.id, edit("Ana Maria", &user.email), None)
            .await
            .unwrap();

        let stored = fx.ctx.user_repo().find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana Maria");
        assert_eq!(stored.cpf, "98765432100");

        let hash = fx
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(PasswordService::new().verify("secret", &hash).unwrap());

        let mut request = edit("Ana Maria", &user.email);
        request.password = Some("fresh".to_string());
        request.confirmpassword = Some("fresh".to_string());
        users.edit_user(user.id, request, None).await.unwrap();

        let hash = fx
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(PasswordService::new().verify("fresh", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_edit_rejects_email_of_another_account() {
        let fx = Fixture::new();
        let ana = fx.user("Ana").await;
        let bia = fx.user("Bia").await;

        let err = UserService::new(&fx.ctx)
            .edit_user(ana.id, edit("Ana", &bia.email), None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[tokio::test]
    async fn test_edit_replaces_profile_image() {
        let fx = Fixture::new();
        let user = fx.user("Ana").await;
        let users = UserService::new(&fx.ctx);

        users
            .edit_user(user.id, edit("Ana", &user.email), Some(png()))
            .await
            .unwrap();
        let first = fx.ctx.user_repo().find_by_id(user.id).await.unwrap().unwrap();
        let first_image = first.image.clone().unwrap();
        assert!(first_image.ends_with(".png"));

        users
            .edit_user(user.id, edit("Ana", &user.email), Some(png()))
            .await
            .unwrap();
        let second = fx.ctx.user_repo().find_by_id(user.id).await.unwrap().unwrap();
        assert_ne!(second.image, Some(first_image));
        assert_eq!(fx.images.stored(ImageFolder::Users).len(), 1);

        let gif = ImageUpload::new("image/gif", vec![1]);
        let err = users
            .edit_user(user.id, edit("Ana", &user.email), Some(gif))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[tokio::test]
    async fn test_edit_removes_new_image_when_update_fails() {
        let fx = Fixture::new();
        let user = fx.user("Ana").await;
        let users = UserService::new(&fx.ctx);
        users
            .edit_user(user.id, edit("Ana", &user.email), Some(png()))
            .await
            .unwrap();
        let kept = fx.images.stored(ImageFolder::Users);

        fx.users.fail_updates();
        let err = users
            .edit_user(user.id, edit("Ana Maria", &user.email), Some(png()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(fx.images.stored(ImageFolder::Users), kept);

        let stored = fx.ctx.user_repo().find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana");
        assert_eq!(stored.image.as_ref(), kept.first());
    }

    #[tokio::test]
    async fn test_edit_requires_fields_in_order() {
        let fx = Fixture::new();
        let user = fx.user("Ana").await;
        let mut request = edit("Ana", &user.email);
        request.phone = None;
        request.cpf = None;

        let err = UserService::new(&fx.ctx)
            .edit_user(user.id, request, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Phone is required");
    }
}
