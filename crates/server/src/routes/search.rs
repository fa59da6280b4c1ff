//! Topic search handler

use axum::{Json, extract::State, response::IntoResponse};
use plainmed_core::{SearchRequest, SearchResponse};

use super::JsonBody;
use crate::db::SharedStore;
use crate::error::AppError;

/// POST /search - Case-insensitive title search within one language
pub async fn search(
    State(store): State<SharedStore>,
    JsonBody(request): JsonBody<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(
        query = %request.query,
        language = %request.language,
        n_results = request.n_results,
        "Searching topics"
    );

    let results = store
        .search_topics(&request)
        .await
        .map_err(AppError::search_failed)?;

    tracing::debug!(count = results.len(), "Search complete");

    Ok(Json(SearchResponse {
        source: store.name().to_string(),
        results,
    }))
}
