//! Authentication service
//!
//! Handles account registration, login and resolving the current user.

use memorial_common::AppError;
use memorial_core::entities::UserAccount;
use memorial_core::value_objects::UserId;
use memorial_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and sign it in
    #[instrument(skip(self, request), fields(email = ?request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let registration = request.checked()?;

        // Check if email already exists
        if self
            .ctx
            .user_repo()
            .email_exists(&registration.email)
            .await?
        {
            warn!("Registration rejected: email already in use");
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&registration.password)?;

        let user = UserAccount::new(
            UserId::generate(),
            registration.name,
            registration.email,
            registration.phone,
            registration.cpf,
        );
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        let token = self.ctx.jwt_service().issue_token(user.id, &user.name)?;
        Ok(AuthResponse::new(
            "You are now registered and signed in",
            token,
            user.id,
        ))
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password fail the same way.
    #[instrument(skip(self, request), fields(email = ?request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let (email, password) = request.credentials()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&password, &password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        let token = self.ctx.jwt_service().issue_token(user.id, &user.name)?;
        Ok(AuthResponse::new("You are now signed in", token, user.id))
    }

    /// Profile of the signed-in caller, `None` for anonymous requests
    #[instrument(skip(self))]
    pub async fn current_user(&self, caller: Option<UserId>) -> ServiceResult<Option<UserResponse>> {
        let Some(user_id) = caller else {
            return Ok(None);
        };

        let user = AccessService::new(self.ctx).caller(user_id).await?;
        Ok(Some(UserResponse::from(&user)))
    }
}
