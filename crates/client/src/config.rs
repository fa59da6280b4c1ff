//! Client configuration

/// Local development server
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:3001";

/// Deployed API
pub const PRODUCTION_BASE_URL: &str = "https://plainmed.vercel.app/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `PLAINMED_API_URL` if set, else the build's default endpoint
    pub fn from_env() -> Self {
        match std::env::var("PLAINMED_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

impl Default for ApiConfig {
    /// Debug builds talk to the local server, release builds to production
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::new(DEVELOPMENT_BASE_URL)
        } else {
            Self::new(PRODUCTION_BASE_URL)
        }
    }
}
