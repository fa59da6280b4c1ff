use plainmed_core::{ValidationErrors, WizardError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The user already has personal info on record
    #[error("{0}")]
    Duplicate(String),

    #[error("server responded {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl ClientError {
    /// Text suitable for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Duplicate(message) => message.clone(),
            ClientError::Rejected { status, message } if *status < 500 => message.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid form: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Backend(#[from] ClientError),
}
