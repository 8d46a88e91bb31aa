//! Authentication extractor
//!
//! Extracts and verifies JWT tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};
use memorial_core::value_objects::UserId;
use memorial_service::AccessService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: UserId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Verify the bearer token against the configured secret
fn verify(
    state: &AppState,
    header: Result<Authorization<Bearer>, TypedHeaderRejection>,
) -> Result<Option<AuthUser>, ApiError> {
    let bearer = match header {
        Ok(Authorization(bearer)) => bearer,
        Err(rejection) if rejection.is_missing() => return Ok(None),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed authorization header");
            return Err(ApiError::InvalidToken);
        }
    };

    let user_id = AccessService::new(state.service_context())
        .authenticate(bearer.token())
        .map_err(|e| {
            tracing::warn!(error = %e, "Invalid access token");
            ApiError::InvalidToken
        })?;

    Ok(Some(AuthUser::new(user_id)))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map(|TypedHeader(header)| header);

        verify(&AppState::from_ref(state), header)?.ok_or(ApiError::MissingAuth)
    }
}

/// Optional authenticated user
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map(|TypedHeader(header)| header);

        verify(&AppState::from_ref(state), header).map(OptionalAuthUser)
    }
}
