//! Application error handling

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use plainmed_core::ErrorBody;
use thiserror::Error;

use crate::db::StoreError;

pub const SEARCH_FAILED: &str = "Search failed";
pub const OPERATION_FAILED: &str = "Operation failed";

/// Application error type
///
/// Store failures keep their source for the server log; clients only see the
/// generic message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", plainmed_core::error::DUPLICATE_PERSONAL_INFO)]
    DuplicatePersonalInfo,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn search_failed(source: StoreError) -> Self {
        AppError::Store {
            message: SEARCH_FAILED,
            source,
        }
    }

    pub fn operation_failed(source: StoreError) -> Self {
        AppError::Store {
            message: OPERATION_FAILED,
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) | AppError::DuplicatePersonalInfo => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
