//! Topic search request/response and title matching rules

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::topic::Topic;

/// Result count used when the request omits `n_results`
pub const DEFAULT_RESULTS: u32 = 5;

/// Upper bound applied to `n_results`
pub const MAX_RESULTS: u32 = 100;

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

/// Body of `POST /search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,

    #[serde(default = "default_results")]
    pub n_results: u32,

    #[serde(default)]
    pub language: Language,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, language: Language) -> Self {
        Self {
            query: query.into(),
            n_results: DEFAULT_RESULTS,
            language,
        }
    }

    pub fn with_results(mut self, n_results: u32) -> Self {
        self.n_results = n_results;
        self
    }

    /// Row limit handed to the store
    pub fn limit(&self) -> u32 {
        self.n_results.min(MAX_RESULTS)
    }
}

/// Body returned by a successful search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub source: String,
    pub results: Vec<Topic>,
}

/// Build an `ILIKE` pattern matching `query` anywhere in the title.
///
/// LIKE metacharacters in the query are escaped with the default `\` escape
/// so user input is matched literally.
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring containment, the same rule `ILIKE '%q%'` applies
pub fn title_matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}
