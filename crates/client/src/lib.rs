//! plainmed-client: typed access to the PlainMed API
//!
//! [`ApiClient`] wraps the HTTP endpoints. [`SurveySession`] runs the
//! two-step survey (wizard plus condition picker) for one user on top of any
//! [`SurveyBackend`], persisting each step before advancing.

mod api;
mod backend;
pub mod config;
mod error;
mod session;

pub use api::ApiClient;
pub use backend::SurveyBackend;
pub use config::ApiConfig;
pub use error::{ClientError, SessionError};
pub use session::SurveySession;
