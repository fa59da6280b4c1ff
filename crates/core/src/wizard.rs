//! Two-step survey wizard
//!
//! `PersonalInfo` → `MedicalHistory` → `Submitted`, linear only. The wizard
//! holds the session's draft; persisting each step is the caller's job and
//! happens *before* the matching `complete_*` call, so a failed save leaves
//! the wizard where it was.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::condition::ConditionSelection;
use crate::language::Language;
use crate::personal_info::{AgeRange, Gender, PersonalDetails};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WizardStep {
    #[default]
    PersonalInfo,
    MedicalHistory,
    Submitted,
}

impl WizardStep {
    /// 1-based position shown as "Step n of 2"
    pub fn number(&self) -> usize {
        match self {
            WizardStep::PersonalInfo => 1,
            WizardStep::MedicalHistory | WizardStep::Submitted => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    AgeRange,
    Gender,
    Language,
}

/// Field-level validation messages, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{}", join_messages(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<FormField, String>,
}

impl ValidationErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }
}

fn join_messages(fields: &BTreeMap<FormField, String>) -> String {
    fields
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("cannot {action} from the {from:?} step")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },
}

/// Raw values of the personal-info form, as selected in the UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfoForm {
    pub age_range: String,
    pub gender: String,
    pub language: String,
}

impl PersonalInfoForm {
    pub fn new(
        age_range: impl Into<String>,
        gender: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            age_range: age_range.into(),
            gender: gender.into(),
            language: language.into(),
        }
    }

    /// Form pre-filled from previously staged answers
    pub fn from_details(details: &PersonalDetails) -> Self {
        Self::new(
            details.age_range.as_str(),
            details.gender.as_str(),
            details.language.as_str(),
        )
    }

    /// All three fields are required and must be one of the offered values
    pub fn validate(&self) -> Result<PersonalDetails, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let age_range = required(
            &self.age_range,
            FormField::AgeRange,
            "Please select an age range.",
            &mut errors,
        )
        .and_then(|value| record(value.parse::<AgeRange>(), FormField::AgeRange, &mut errors));
        let gender = required(
            &self.gender,
            FormField::Gender,
            "Please select a gender.",
            &mut errors,
        )
        .and_then(|value| record(value.parse::<Gender>(), FormField::Gender, &mut errors));
        let language = required(
            &self.language,
            FormField::Language,
            "Please select a language.",
            &mut errors,
        )
        .and_then(|value| record(value.parse::<Language>(), FormField::Language, &mut errors));

        match (age_range, gender, language) {
            (Some(age_range), Some(gender), Some(language)) => Ok(PersonalDetails {
                age_range,
                gender,
                language,
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(
    value: &'a str,
    field: FormField,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, message);
        None
    } else {
        Some(value)
    }
}

fn record<T, E: fmt::Display>(
    parsed: Result<T, E>,
    field: FormField,
    errors: &mut ValidationErrors,
) -> Option<T> {
    parsed.map_err(|e| errors.insert(field, e.to_string())).ok()
}

/// Everything collected so far in one wizard session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveyDraft {
    pub personal_info: Option<PersonalDetails>,
    pub conditions: Vec<ConditionSelection>,
}

#[derive(Debug, Clone, Default)]
pub struct SurveyWizard {
    step: WizardStep,
    draft: SurveyDraft,
}

impl SurveyWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over from the first step with previously persisted answers
    pub fn resume(draft: SurveyDraft) -> Self {
        Self {
            step: WizardStep::PersonalInfo,
            draft,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    pub fn into_draft(self) -> SurveyDraft {
        self.draft
    }

    /// Language chosen on the first step, English until then
    pub fn display_language(&self) -> Language {
        self.draft
            .personal_info
            .map(|details| details.language)
            .unwrap_or_default()
    }

    /// Form values for the first step
    pub fn personal_info_form(&self) -> PersonalInfoForm {
        self.draft
            .personal_info
            .as_ref()
            .map(PersonalInfoForm::from_details)
            .unwrap_or_default()
    }

    /// Stage validated personal details and move to the medical-history step
    pub fn complete_personal_info(&mut self, details: PersonalDetails) -> Result<(), WizardError> {
        self.require(WizardStep::PersonalInfo, "complete personal info")?;
        self.draft.personal_info = Some(details);
        self.step = WizardStep::MedicalHistory;
        Ok(())
    }

    /// Back to the personal-info step; staged data is kept
    pub fn previous(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::MedicalHistory, "go back")?;
        self.step = WizardStep::PersonalInfo;
        Ok(())
    }

    /// Merge the selected conditions into the draft and finish
    pub fn complete_medical_history(
        &mut self,
        conditions: Vec<ConditionSelection>,
    ) -> Result<(), WizardError> {
        self.require(WizardStep::MedicalHistory, "complete medical history")?;
        let mut merged: Vec<ConditionSelection> = Vec::with_capacity(conditions.len());
        for condition in conditions {
            if !merged.iter().any(|c| c.concept_id == condition.concept_id) {
                merged.push(condition);
            }
        }
        self.draft.conditions = merged;
        self.step = WizardStep::Submitted;
        Ok(())
    }

    /// Fail unless the wizard is on `step`
    pub fn require(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.step,
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish_form() -> PersonalInfoForm {
        PersonalInfoForm::new("25-34", "female", "Spanish")
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = PersonalInfoForm::default().validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(FormField::AgeRange), Some("Please select an age range."));
        assert_eq!(errors.get(FormField::Gender), Some("Please select a gender."));
        assert_eq!(errors.get(FormField::Language), Some("Please select a language."));
    }

    #[test]
    fn unknown_values_are_field_errors() {
        let errors = PersonalInfoForm::new("25-34", "robot", "French")
            .validate()
            .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.get(FormField::AgeRange).is_none());
        assert_eq!(errors.get(FormField::Gender), Some("Unknown gender: robot"));
        assert_eq!(errors.get(FormField::Language), Some("Unknown language: French"));
        assert_eq!(
            errors.to_string(),
            "Unknown gender: robot Unknown language: French"
        );
    }

    #[test]
    fn linear_flow() {
        let mut wizard = SurveyWizard::new();
        assert_eq!(wizard.step(), WizardStep::PersonalInfo);
        assert_eq!(wizard.display_language(), Language::English);

        let details = spanish_form().validate().unwrap();
        wizard.complete_personal_info(details).unwrap();
        assert_eq!(wizard.step(), WizardStep::MedicalHistory);
        assert_eq!(wizard.step().number(), 2);
        assert_eq!(wizard.display_language(), Language::Spanish);

        wizard.previous().unwrap();
        assert_eq!(wizard.step(), WizardStep::PersonalInfo);
        assert_eq!(wizard.draft().personal_info, Some(details));
        assert_eq!(wizard.personal_info_form(), spanish_form());

        wizard.complete_personal_info(details).unwrap();
        wizard
            .complete_medical_history(vec![
                ConditionSelection::new("Asthma", "AS001"),
                ConditionSelection::new("Asthma", "AS001"),
            ])
            .unwrap();
        assert_eq!(wizard.step(), WizardStep::Submitted);
        assert_eq!(wizard.draft().conditions.len(), 1);
    }

    #[test]
    fn no_skipping_steps() {
        let mut wizard = SurveyWizard::new();

        assert_eq!(
            wizard.complete_medical_history(Vec::new()),
            Err(WizardError::InvalidTransition {
                from: WizardStep::PersonalInfo,
                action: "complete medical history",
            })
        );
        assert!(wizard.previous().is_err());

        let details = spanish_form().validate().unwrap();
        wizard.complete_personal_info(details).unwrap();
        wizard.complete_medical_history(Vec::new()).unwrap();

        assert!(wizard.previous().is_err());
        assert!(wizard.complete_personal_info(details).is_err());
    }
}
