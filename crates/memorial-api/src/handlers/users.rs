//! User handlers
//!
//! Registration, login, caller resolution and profile management.

use axum::{
    extract::{Path, State},
    Json,
};
use memorial_service::dto::{
    AuthResponse, EditUserRequest, LoginRequest, MessageResponse, RegisterRequest, UserEnvelope,
    UserResponse,
};
use memorial_service::{AuthService, UserService};

use crate::extractors::{AuthUser, JsonBody, MultipartForm, OptionalAuthUser};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Resolve the caller; `null` for anonymous requests
///
/// GET /users/checkuser
pub async fn check_user(
    State(state): State<AppState>,
    OptionalAuthUser(auth): OptionalAuthUser,
) -> ApiResult<Json<Option<UserResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.current_user(auth.map(|a| a.user_id)).await?;
    Ok(Json(response))
}

/// Public profile
///
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserEnvelope>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(&id).await?;
    Ok(Json(response))
}

/// Edit the caller's profile; the path id is not consulted
///
/// PATCH /users/{id}
pub async fn edit_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(_id): Path<String>,
    form: MultipartForm<EditUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let image = form.files.into_iter().next();
    let response = service.edit_user(auth.user_id, form.fields, image).await?;
    Ok(Json(response))
}
