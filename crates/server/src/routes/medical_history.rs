//! Medical-history handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use plainmed_core::{ConditionSelection, MedicalHistory, condition::first_duplicate};
use serde::Deserialize;

use super::JsonBody;
use crate::db::SharedStore;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    conditions: Vec<ConditionSelection>,
}

/// GET /medical-history/{user_id} - Saved conditions, in selection order
pub async fn fetch(
    State(store): State<SharedStore>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let conditions = store
        .medical_history(&user_id)
        .await
        .map_err(AppError::operation_failed)?;

    Ok(Json(MedicalHistory {
        user_id,
        conditions,
    }))
}

/// PUT /medical-history/{user_id} - Replace the saved selection set
pub async fn save(
    State(store): State<SharedStore>,
    Path(user_id): Path<String>,
    JsonBody(body): JsonBody<SaveRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(concept_id) = first_duplicate(&body.conditions) {
        return Err(AppError::BadRequest(format!(
            "Duplicate condition: {concept_id}"
        )));
    }
    if let Some(blank) = body.conditions.iter().find(|c| c.concept_id.trim().is_empty()) {
        return Err(AppError::BadRequest(format!(
            "Condition '{}' has no concept_id",
            blank.name
        )));
    }

    store
        .replace_medical_history(&user_id, &body.conditions)
        .await
        .map_err(AppError::operation_failed)?;

    tracing::info!(
        user_id = %user_id,
        count = body.conditions.len(),
        "Medical history saved"
    );

    Ok(Json(MedicalHistory {
        user_id,
        conditions: body.conditions,
    }))
}
