use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::language::Language;

/// One localized MedlinePlus health topic
///
/// Rows are keyed by `(topic_id, language)`: the same concept may exist once
/// per language. The application only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub topic_id: String,
    pub title: String,
    pub language: Language,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub meta_desc: Option<String>,

    #[serde(default)]
    pub full_summary: Option<String>,

    #[serde(default)]
    pub aliases: Option<JsonValue>,

    #[serde(default)]
    pub mesh_headings: Option<JsonValue>,

    #[serde(default)]
    pub groups: Option<JsonValue>,

    #[serde(default)]
    pub primary_institute: Option<JsonValue>,

    #[serde(default)]
    pub date_created: Option<String>,
}

impl Topic {
    /// Minimal topic with only the identifying fields set
    pub fn new(topic_id: impl Into<String>, title: impl Into<String>, language: Language) -> Self {
        Self {
            topic_id: topic_id.into(),
            title: title.into(),
            language,
            url: None,
            meta_desc: None,
            full_summary: None,
            aliases: None,
            mesh_headings: None,
            groups: None,
            primary_institute: None,
            date_created: None,
        }
    }
}
