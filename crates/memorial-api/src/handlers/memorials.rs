//! Memorial record handlers
//!
//! Record CRUD, the adoption workflow and comments.

use axum::{
    extract::{Path, State},
    Json,
};
use memorial_service::dto::{
    CommentRequest, CommentsResponse, CreatedRecordResponse, MessageResponse,
    OwnedRecordsResponse, RecordForm, RecordListResponse, RecordResponse,
};
use memorial_service::MemorialService;

use crate::extractors::{AuthUser, JsonBody, MultipartForm};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a record with up to five images
///
/// POST /sepultados/create
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    form: MultipartForm<RecordForm>,
) -> ApiResult<Created<Json<CreatedRecordResponse>>> {
    let service = MemorialService::new(state.service_context());
    let response = service
        .create(auth.user_id, form.fields, form.files)
        .await?;
    Ok(Created(Json(response)))
}

/// Latest records
///
/// GET /sepultados
pub async fn list_records(State(state): State<AppState>) -> ApiResult<Json<RecordListResponse>> {
    let service = MemorialService::new(state.service_context());
    let response = service.list_latest().await?;
    Ok(Json(response))
}

/// Records owned by the caller
///
/// GET /sepultados/meussepultados
pub async fn list_owned_records(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<OwnedRecordsResponse>> {
    let service = MemorialService::new(state.service_context());
    let response = service.list_owned(auth.user_id).await?;
    Ok(Json(response))
}

/// GET /sepultados/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecordResponse>> {
    let service = MemorialService::new(state.service_context());
    let response = service.get(&id).await?;
    Ok(Json(response))
}

/// Update a record the caller owns
///
/// PATCH /sepultados/{id}
pub async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    form: MultipartForm<RecordForm>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemorialService::new(state.service_context());
    let response = service
        .update(auth.user_id, &id, form.fields, form.files)
        .await?;
    Ok(Json(response))
}

/// DELETE /sepultados/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemorialService::new(state.service_context());
    let response = service.delete(auth.user_id, &id).await?;
    Ok(Json(response))
}

/// Request adoption of a record
///
/// PATCH /sepultados/schedule/{id}
pub async fn schedule_adoption(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemorialService::new(state.service_context());
    let response = service.schedule(auth.user_id, &id).await?;
    Ok(Json(response))
}

/// Close a record for adoption
///
/// PATCH /sepultados/conclude/{id}
pub async fn conclude_adoption(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemorialService::new(state.service_context());
    let response = service.conclude(auth.user_id, &id).await?;
    Ok(Json(response))
}

/// POST /sepultados/{id}/comentario
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<CommentRequest>,
) -> ApiResult<Created<Json<CommentsResponse>>> {
    let service = MemorialService::new(state.service_context());
    let response = service.comment(auth.user_id, &id, request).await?;
    Ok(Created(Json(response)))
}
