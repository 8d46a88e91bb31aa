//! Search handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use memorial_service::dto::{
    AutocompleteResponse, SearchParams, SearchResponse, SuggestionsResponse,
};
use memorial_service::SearchService;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

type SearchQuery = Result<Query<SearchParams>, QueryRejection>;

/// Unreadable values such as `limit=abc` answer 400
fn params(query: SearchQuery) -> ApiResult<SearchParams> {
    query
        .map(|Query(params)| params)
        .map_err(|e| ApiError::invalid_body(e.body_text()))
}

/// Full search over name, street, block and plaque
///
/// GET /sepultados/pesquisa, GET /sepultados/search
pub async fn search_records(
    State(state): State<AppState>,
    query: SearchQuery,
) -> ApiResult<Json<SearchResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service.search(params(query)?).await?;
    Ok(Json(response))
}

/// GET /sepultados/sugestoes
pub async fn suggestions(
    State(state): State<AppState>,
    query: SearchQuery,
) -> ApiResult<Json<SuggestionsResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service.suggestions(params(query)?.q).await?;
    Ok(Json(response))
}

/// GET /sepultados/autocomplete
pub async fn autocomplete(
    State(state): State<AppState>,
    query: SearchQuery,
) -> ApiResult<Json<AutocompleteResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service.autocomplete(params(query)?.q).await?;
    Ok(Json(response))
}
