//! Built-in condition taxonomy

use axum::{Json, extract::Query, response::IntoResponse};
use plainmed_core::{Language, taxonomy};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Default)]
pub struct ConditionsParams {
    pub language: Option<String>,
}

/// GET /conditions - Common conditions grouped by body system, localized
pub async fn list(Query(params): Query<ConditionsParams>) -> Result<impl IntoResponse, AppError> {
    let language = match params.language.as_deref() {
        Some(raw) => raw
            .parse::<Language>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => Language::default(),
    };

    Ok(Json(taxonomy::localized(language)))
}
