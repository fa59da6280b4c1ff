//! One user's pass through the survey
//!
//! The session owns the wizard, the picker and the backend handle. Each step
//! is persisted before the wizard advances. A failed save leaves the wizard
//! on the same step with a notice for the user, who retries by submitting
//! again.

use plainmed_core::{
    ConditionPicker, ConditionSelection, Language, NewPersonalInfo, PersonalInfoForm,
    PickerOption, SearchResponse, SearchTicket, SurveyDraft, SurveyWizard, WizardStep,
};

use crate::backend::SurveyBackend;
use crate::error::{ClientError, SessionError};

pub struct SurveySession<B> {
    backend: B,
    user_id: String,
    wizard: SurveyWizard,
    picker: ConditionPicker,
    personal_info_saved: bool,
    notice: Option<String>,
}

impl<B: SurveyBackend> SurveySession<B> {
    /// Fresh session for a user with nothing on record
    pub fn new(backend: B, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
            wizard: SurveyWizard::new(),
            picker: ConditionPicker::new(),
            personal_info_saved: false,
            notice: None,
        }
    }

    /// Session pre-filled with whatever the user already saved
    pub async fn resume(backend: B, user_id: impl Into<String>) -> Result<Self, ClientError> {
        let user_id = user_id.into();
        let status = backend.personal_info(&user_id).await?;
        let conditions = backend.medical_history(&user_id).await?;

        tracing::debug!(
            user_id = %user_id,
            has_completed_form = status.has_completed_form,
            conditions = conditions.len(),
            "Resuming survey"
        );

        let picker = ConditionPicker::with_selected(conditions);
        let draft = SurveyDraft {
            personal_info: status.data.as_ref().map(|row| row.details()),
            conditions: picker.selected().to_vec(),
        };

        Ok(Self {
            backend,
            user_id,
            wizard: SurveyWizard::resume(draft),
            picker,
            personal_info_saved: status.has_completed_form,
            notice: None,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn draft(&self) -> &SurveyDraft {
        self.wizard.draft()
    }

    pub fn picker(&self) -> &ConditionPicker {
        &self.picker
    }

    pub fn display_language(&self) -> Language {
        self.wizard.display_language()
    }

    /// Values to pre-fill the personal-info form with
    pub fn personal_info_form(&self) -> PersonalInfoForm {
        self.wizard.personal_info_form()
    }

    /// Pending transient notification, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Validate step 1, create the personal-info row if it does not exist
    /// yet, then move to step 2.
    pub async fn submit_personal_info(
        &mut self,
        form: &PersonalInfoForm,
    ) -> Result<(), SessionError> {
        self.wizard
            .require(WizardStep::PersonalInfo, "complete personal info")?;
        let details = form.validate()?;

        if !self.personal_info_saved {
            let info = NewPersonalInfo::new(self.user_id.clone(), details);
            if let Err(e) = self.backend.create_personal_info(&info).await {
                tracing::warn!(user_id = %self.user_id, error = %e, "Saving personal info failed");
                self.notice = Some(e.user_message());
                return Err(e.into());
            }
            self.personal_info_saved = true;
        }

        self.notice = None;
        self.wizard.complete_personal_info(details)?;
        Ok(())
    }

    /// Back to step 1, keeping everything entered so far
    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.wizard.previous()?;
        Ok(())
    }

    /// Feed a new search-box value to the picker; returns the search to run
    pub fn query_changed(&mut self, term: &str) -> Option<SearchTicket> {
        let language = self.display_language();
        self.picker.query_changed(term, language)
    }

    /// Apply the outcome of a ticket's search. Returns false when a newer
    /// query superseded it.
    pub fn apply_search(
        &mut self,
        seq: u64,
        result: Result<SearchResponse, ClientError>,
    ) -> bool {
        match result {
            Ok(response) => self.picker.apply_results(seq, &response.results),
            Err(e) => {
                tracing::warn!(error = %e, "Condition search failed");
                self.picker.search_failed(seq)
            }
        }
    }

    /// `query_changed` followed by the search itself
    pub async fn search(&mut self, term: &str) -> bool {
        let Some(ticket) = self.query_changed(term) else {
            return false;
        };
        let result = self.backend.search(&ticket.request).await;
        self.apply_search(ticket.seq, result)
    }

    pub fn add_condition(&mut self, condition: ConditionSelection) -> bool {
        self.picker.add(condition)
    }

    pub fn add_taxonomy_condition(&mut self, concept_id: &str) -> bool {
        self.picker.add_from_taxonomy(concept_id)
    }

    pub fn remove_condition(&mut self, concept_id: &str) -> bool {
        self.picker.remove(concept_id)
    }

    /// Taxonomy and suggestions merged, labelled in the display language
    pub fn options(&self) -> Vec<PickerOption> {
        self.picker.options(self.display_language())
    }

    pub fn selected_labels(&self) -> Vec<&str> {
        self.picker.selected_labels(self.display_language())
    }

    /// Save the selection set, then finish the survey
    pub async fn submit_medical_history(&mut self) -> Result<(), SessionError> {
        self.wizard
            .require(WizardStep::MedicalHistory, "complete medical history")?;

        let conditions = self.picker.selected().to_vec();
        if let Err(e) = self
            .backend
            .save_medical_history(&self.user_id, &conditions)
            .await
        {
            tracing::warn!(user_id = %self.user_id, error = %e, "Saving medical history failed");
            self.notice = Some(e.user_message());
            return Err(e.into());
        }

        self.notice = None;
        self.wizard.complete_medical_history(conditions)?;
        tracing::info!(user_id = %self.user_id, "Survey submitted");
        Ok(())
    }
}
