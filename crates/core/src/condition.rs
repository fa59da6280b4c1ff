use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::topic::Topic;

/// `semantic_type` given to every MedlinePlus-backed condition
pub const MEDLINEPLUS_SEMANTIC_TYPE: &str = "MedlinePlus Topic";

/// `sources` given to every MedlinePlus-backed condition
pub const MEDLINEPLUS_SOURCE: &str = "MedlinePlus";

/// A medical-history condition, either offered to the user or already selected
///
/// `concept_id` is the identity: a fixed taxonomy code such as `HP001`, or the
/// `topic_id` of a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSelection {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_es: Option<String>,

    pub concept_id: String,
    pub semantic_type: String,
    pub sources: String,
}

impl ConditionSelection {
    pub fn new(name: impl Into<String>, concept_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_es: None,
            concept_id: concept_id.into(),
            semantic_type: MEDLINEPLUS_SEMANTIC_TYPE.to_string(),
            sources: MEDLINEPLUS_SOURCE.to_string(),
        }
    }

    pub fn with_spanish(mut self, name_es: impl Into<String>) -> Self {
        self.name_es = Some(name_es.into());
        self
    }

    /// Name shown for `language`, falling back to the English name
    pub fn display_name(&self, language: Language) -> &str {
        match (language, self.name_es.as_deref()) {
            (Language::Spanish, Some(name_es)) => name_es,
            _ => &self.name,
        }
    }
}

impl From<&Topic> for ConditionSelection {
    /// Search results are already in the requested language, so the title
    /// doubles as the translated name.
    fn from(topic: &Topic) -> Self {
        Self {
            name: topic.title.clone(),
            name_es: Some(topic.title.clone()),
            concept_id: topic.topic_id.clone(),
            semantic_type: MEDLINEPLUS_SEMANTIC_TYPE.to_string(),
            sources: MEDLINEPLUS_SOURCE.to_string(),
        }
    }
}

/// Body of `PUT`/`GET /medical-history/{user_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub user_id: String,

    #[serde(default)]
    pub conditions: Vec<ConditionSelection>,
}

/// First `concept_id` that appears more than once, if any
pub fn first_duplicate(conditions: &[ConditionSelection]) -> Option<&str> {
    conditions.iter().enumerate().find_map(|(i, condition)| {
        conditions[..i]
            .iter()
            .any(|earlier| earlier.concept_id == condition.concept_id)
            .then_some(condition.concept_id.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_falls_back_to_english() {
        let translated = ConditionSelection::new("Asthma", "AS001").with_spanish("Asma");
        let untranslated = ConditionSelection::new("Gout", "topic-9");

        assert_eq!(translated.display_name(Language::Spanish), "Asma");
        assert_eq!(translated.display_name(Language::English), "Asthma");
        assert_eq!(untranslated.display_name(Language::Spanish), "Gout");
    }

    #[test]
    fn topics_map_to_medlineplus_conditions() {
        let topic = Topic::new("t-42", "Diabetes", Language::English);
        let condition = ConditionSelection::from(&topic);

        assert_eq!(condition.concept_id, "t-42");
        assert_eq!(condition.name, "Diabetes");
        assert_eq!(condition.semantic_type, "MedlinePlus Topic");
        assert_eq!(condition.sources, "MedlinePlus");
    }

    #[test]
    fn detects_duplicate_concepts() {
        let a = ConditionSelection::new("A", "1");
        let b = ConditionSelection::new("B", "2");
        assert_eq!(first_duplicate(&[a.clone(), b.clone()]), None);
        assert_eq!(first_duplicate(&[a.clone(), b, a]), Some("1"));
    }
}
