//! Built-in bilingual list of common conditions, grouped by body system

use serde::Serialize;

use crate::condition::ConditionSelection;
use crate::language::Language;

/// A condition with a fixed concept code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub name: &'static str,
    pub name_es: &'static str,
    pub concept_id: &'static str,
}

impl TaxonomyEntry {
    pub fn to_condition(&self) -> ConditionSelection {
        ConditionSelection::new(self.name, self.concept_id).with_spanish(self.name_es)
    }
}

/// A body-system category of the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub name_es: &'static str,
    pub conditions: &'static [TaxonomyEntry],
}

impl Category {
    pub fn display_name(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.name,
            Language::Spanish => self.name_es,
        }
    }
}

const fn entry(name: &'static str, name_es: &'static str, concept_id: &'static str) -> TaxonomyEntry {
    TaxonomyEntry {
        name,
        name_es,
        concept_id,
    }
}

static CATEGORIES: [Category; 5] = [
    Category {
        name: "Heart",
        name_es: "Corazón",
        conditions: &[
            entry("High Blood Pressure", "Presión Arterial Alta", "HP001"),
            entry("Heart Disease", "Enfermedad Cardíaca", "HD001"),
            entry("High Cholesterol", "Colesterol Alto", "HC001"),
        ],
    },
    Category {
        name: "Metabolic",
        name_es: "Metabólico",
        conditions: &[
            entry("Diabetes", "Diabetes", "DB001"),
            entry("Thyroid Problems", "Problemas de Tiroides", "TH001"),
            entry("Obesity", "Obesidad", "OB001"),
        ],
    },
    Category {
        name: "Respiratory",
        name_es: "Respiratorio",
        conditions: &[
            entry("Asthma", "Asma", "AS001"),
            entry("COPD", "EPOC", "CP001"),
            entry("Sleep Apnea", "Apnea del Sueño", "SA001"),
        ],
    },
    Category {
        name: "Musculoskeletal",
        name_es: "Musculoesquelético",
        conditions: &[
            entry("Arthritis", "Artritis", "AR001"),
            entry("Osteoporosis", "Osteoporosis", "OS001"),
            entry("Back Pain", "Dolor de Espalda", "BP001"),
        ],
    },
    Category {
        name: "Mental Health",
        name_es: "Salud Mental",
        conditions: &[
            entry("Depression", "Depresión", "DP001"),
            entry("Anxiety", "Ansiedad", "AX001"),
            entry("PTSD", "Trastorno de Estrés Postraumático", "PT001"),
        ],
    },
];

/// All categories in display order
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

/// Every taxonomy entry, category by category
pub fn entries() -> impl Iterator<Item = &'static TaxonomyEntry> {
    CATEGORIES.iter().flat_map(|category| category.conditions.iter())
}

/// Look up a taxonomy entry by concept code
pub fn find(concept_id: &str) -> Option<&'static TaxonomyEntry> {
    entries().find(|entry| entry.concept_id == concept_id)
}

/// A category rendered for one language (`GET /conditions`)
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedCategory {
    pub category: &'static str,
    pub name: &'static str,
    pub conditions: Vec<LocalizedCondition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedCondition {
    pub label: String,
    #[serde(flatten)]
    pub condition: ConditionSelection,
}

pub fn localized(language: Language) -> Vec<LocalizedCategory> {
    CATEGORIES
        .iter()
        .map(|category| LocalizedCategory {
            category: category.name,
            name: category.display_name(language),
            conditions: category
                .conditions
                .iter()
                .map(|entry| {
                    let condition = entry.to_condition();
                    LocalizedCondition {
                        label: condition.display_name(language).to_string(),
                        condition,
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn concept_ids_are_unique() {
        let ids: HashSet<_> = entries().map(|entry| entry.concept_id).collect();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn lookup_by_concept() {
        let copd = find("CP001").unwrap();
        assert_eq!(copd.name, "COPD");
        assert_eq!(copd.to_condition().display_name(Language::Spanish), "EPOC");
        assert!(find("XX999").is_none());
    }

    #[test]
    fn localized_categories_use_spanish_names() {
        let spanish = localized(Language::Spanish);
        assert_eq!(spanish[0].name, "Corazón");
        assert_eq!(spanish[0].category, "Heart");
        assert_eq!(spanish[0].conditions[0].label, "Presión Arterial Alta");

        let english = localized(Language::English);
        assert_eq!(english[4].name, "Mental Health");
        assert_eq!(english[4].conditions[2].label, "PTSD");
    }
}
