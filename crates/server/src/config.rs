//! Server configuration

use std::path::PathBuf;

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:5173,https://plainmed.vercel.app";

/// Server configuration loaded from environment variables
pub struct Config {
    /// PostgreSQL URL; `None` runs against the in-memory store
    pub database_url: Option<String>,
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    /// JSON array of topics used to seed the in-memory store
    pub topics_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3001".into()),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            ),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            topics_file: std::env::var_os("TOPICS_FILE").map(PathBuf::from),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed() {
        assert_eq!(
            parse_origins(" http://a.test , ,https://b.test"),
            vec!["http://a.test", "https://b.test"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
    }
}
