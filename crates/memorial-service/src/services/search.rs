//! Search service
//!
//! Full search, name suggestions and autocomplete over memorial records.
//! Storage filters and orders on folded columns before applying its limit;
//! the rows it returns are re-checked with [`memorial_core::search`].

use memorial_core::search::{self, SearchField, SearchQuery, SUGGESTION_LIMIT};
use tracing::{debug, instrument};

use crate::dto::{
    AutocompleteResponse, SearchHit, SearchParams, SearchResponse, SuggestionItem,
    SuggestionsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Full search across name, street, block and plaque
    #[instrument(skip(self))]
    pub async fn search(&self, params: SearchParams) -> ServiceResult<SearchResponse> {
        let query = params
            .q
            .as_deref()
            .and_then(SearchQuery::parse)
            .ok_or_else(|| ServiceError::bad_request("Search term is required"))?;
        let limit = search::clamp_limit(params.limit);

        let records = self.ctx.memorial_repo().search(&query, limit).await?;
        debug!(rows = records.len(), "Loaded search results");
        let ranked = search::rank(&query, records, limit);

        let results: Vec<SearchHit> = ranked.iter().map(SearchHit::from).collect();
        Ok(SearchResponse {
            total: results.len(),
            results,
            search_term: query.raw().to_string(),
        })
    }

    /// Name suggestions while the user types
    #[instrument(skip(self))]
    pub async fn suggestions(&self, q: Option<String>) -> ServiceResult<SuggestionsResponse> {
        let raw = q.unwrap_or_default();
        let Some(query) = SearchQuery::parse(&raw).filter(|query| !query.is_short()) else {
            return Ok(SuggestionsResponse::empty(raw.trim()));
        };

        let records = self
            .ctx
            .memorial_repo()
            .suggest_by_name(&query, SUGGESTION_LIMIT)
            .await?;
        let suggestions: Vec<SuggestionItem> = search::suggest(&query, records)
            .iter()
            .map(SuggestionItem::from)
            .collect();

        Ok(SuggestionsResponse {
            total: suggestions.len(),
            suggestions,
            search_term: query.raw().to_string(),
        })
    }

    /// Distinct name, street and block values completing the query
    #[instrument(skip(self))]
    pub async fn autocomplete(&self, q: Option<String>) -> ServiceResult<AutocompleteResponse> {
        let raw = q.unwrap_or_default();
        let Some(query) = SearchQuery::parse(&raw).filter(|query| !query.is_short()) else {
            return Ok(AutocompleteResponse {
                autocomplete: Vec::new(),
                search_term: raw.trim().to_string(),
            });
        };

        let mut per_field = Vec::with_capacity(SearchField::ALL.len());
        for field in SearchField::ALL {
            let values = self
                .ctx
                .memorial_repo()
                .distinct_values(field, &query, field.completion_cap())
                .await?;
            per_field.push(search::field_completions(
                &query,
                field,
                values.iter().map(String::as_str),
            ));
        }

        Ok(AutocompleteResponse {
            autocomplete: search::merge_completions(&query, per_field),
            search_term: query.raw().to_string(),
        })
    }
}
