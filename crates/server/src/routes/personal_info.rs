//! Personal-info handlers: create once, fetch by user

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use plainmed_core::{NewPersonalInfo, PersonalInfoStatus};

use super::JsonBody;
use crate::db::{SharedStore, StoreError};
use crate::error::AppError;

/// POST /personal-info - Create the user's row, rejecting a second one
pub async fn create(
    State(store): State<SharedStore>,
    JsonBody(info): JsonBody<NewPersonalInfo>,
) -> Result<impl IntoResponse, AppError> {
    if info.user_id.trim().is_empty() {
        return Err(AppError::BadRequest("user_id is required".to_string()));
    }

    let existing = store
        .find_personal_info(&info.user_id)
        .await
        .map_err(AppError::operation_failed)?;
    if existing.is_some() {
        tracing::info!(user_id = %info.user_id, "Personal info already exists");
        return Err(AppError::DuplicatePersonalInfo);
    }

    // The store enforces uniqueness too, for requests racing past the check
    let row = match store.insert_personal_info(&info).await {
        Ok(row) => row,
        Err(StoreError::Duplicate(_)) => return Err(AppError::DuplicatePersonalInfo),
        Err(e) => return Err(AppError::operation_failed(e)),
    };

    tracing::info!(user_id = %row.user_id, id = row.id, "Personal info created");
    Ok(Json(row))
}

/// GET /personal-info/{user_id} - Whether the user completed the form, and the row
pub async fn fetch(
    State(store): State<SharedStore>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = store
        .find_personal_info(&user_id)
        .await
        .map_err(AppError::operation_failed)?;

    Ok(Json(PersonalInfoStatus::from(row)))
}
