//! Access control service
//!
//! Resolves bearer tokens to accounts and enforces record ownership.

use memorial_common::AppError;
use memorial_core::entities::{MemorialRecord, UserAccount};
use memorial_core::value_objects::UserId;
use memorial_core::DomainError;
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Access control service
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    /// Create a new AccessService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Verify a bearer token and return the caller id it names
    pub fn authenticate(&self, token: &str) -> ServiceResult<UserId> {
        Ok(self.ctx.jwt_service().verify(token)?)
    }

    /// Load the caller's account
    ///
    /// A well-signed token whose account no longer exists is reported as an
    /// invalid token.
    #[instrument(skip(self))]
    pub async fn caller(&self, user_id: UserId) -> ServiceResult<UserAccount> {
        self.ctx.user_repo().find_by_id(user_id).await?.ok_or_else(|| {
            warn!(user_id = %user_id, "Token refers to an unknown account");
            AppError::InvalidToken.into()
        })
    }

    /// Fail unless `caller` owns `record`
    pub fn ensure_owner(&self, record: &MemorialRecord, caller: UserId) -> ServiceResult<()> {
        if record.is_owned_by(caller) {
            return Ok(());
        }
        warn!(
            record_id = %record.id,
            owner_id = %record.owner().id,
            caller_id = %caller,
            "Rejected change by non-owner"
        );
        Err(DomainError::NotRecordOwner.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let fx = Fixture::new();
        let user = fx.user("Ana").await;
        let token = fx.ctx.jwt_service().issue_token(user.id, &user.name).unwrap();

        let access = AccessService::new(&fx.ctx);
        assert_eq!(access.authenticate(&token).unwrap(), user.id);

        let err = access.authenticate("garbage").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_unknown_caller_is_invalid_token() {
        let fx = Fixture::new();
        let err = AccessService::new(&fx.ctx)
            .caller(UserId::generate())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[tokio::test]
    async fn test_ensure_owner() {
        let fx = Fixture::new();
        let owner = fx.user("Ana").await;
        let other = fx.user("Bia").await;
        let record = fx.record(&owner, "José", "Rua A").await;

        let access = AccessService::new(&fx.ctx);
        assert!(access.ensure_owner(&record, owner.id).is_ok());
        assert_eq!(
            access.ensure_owner(&record, other.id).unwrap_err().status_code(),
            403
        );
    }
}
