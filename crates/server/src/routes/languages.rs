//! Language coverage of the topics table

use std::collections::BTreeMap;

use axum::{Json, extract::State, response::IntoResponse};
use plainmed_core::{Language, SearchRequest, Topic};
use serde::Serialize;

use crate::db::SharedStore;
use crate::error::AppError;

#[derive(Serialize)]
pub struct LanguagesResponse {
    available_languages: Vec<String>,
    sample_by_language: BTreeMap<String, Vec<Topic>>,
}

/// GET /languages - Languages present in the topics table with one sample row each
pub async fn list(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let available_languages = store
        .languages()
        .await
        .map_err(AppError::operation_failed)?;

    let mut sample_by_language = BTreeMap::new();
    for raw in &available_languages {
        let Ok(language) = raw.parse::<Language>() else {
            tracing::warn!(language = %raw, "Topics table holds an unsupported language");
            continue;
        };
        let sample = store
            .search_topics(&SearchRequest::new("", language).with_results(1))
            .await
            .map_err(AppError::operation_failed)?;
        sample_by_language.insert(raw.clone(), sample);
    }

    Ok(Json(LanguagesResponse {
        available_languages,
        sample_by_language,
    }))
}
