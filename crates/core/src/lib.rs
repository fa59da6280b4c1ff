//! plainmed-core: shared types and client-side survey logic
//!
//! Holds the MedlinePlus topic and personal-info data model, the bilingual
//! condition taxonomy, the condition picker and the survey wizard. Nothing
//! in this crate performs I/O.

pub mod condition;
pub mod error;
pub mod language;
pub mod personal_info;
pub mod picker;
pub mod search;
pub mod taxonomy;
pub mod topic;
pub mod wizard;

pub use condition::{ConditionSelection, MedicalHistory};
pub use error::{ErrorBody, ParseError};
pub use language::Language;
pub use personal_info::{
    AgeRange, Gender, NewPersonalInfo, PersonalDetails, PersonalInfo, PersonalInfoStatus,
};
pub use picker::{ConditionPicker, OptionOrigin, PickerOption, SearchTicket};
pub use search::{SearchRequest, SearchResponse};
pub use topic::Topic;
pub use wizard::{
    FormField, PersonalInfoForm, SurveyDraft, SurveyWizard, ValidationErrors, WizardError,
    WizardStep,
};
