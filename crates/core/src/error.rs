use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned when a user tries to create personal info twice
pub const DUPLICATE_PERSONAL_INFO: &str = "Personal information already exists for this user";

/// Errors parsing enumerated values coming from forms or storage
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown language: {0}")]
    Language(String),

    #[error("Unknown age range: {0}")]
    AgeRange(String),

    #[error("Unknown gender: {0}")]
    Gender(String),
}

/// JSON error body returned by every failing endpoint: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
