//! Survey session tests against an in-process fake backend.

use std::sync::Mutex;

use async_trait::async_trait;
use plainmed_client::{ClientError, SessionError, SurveyBackend, SurveySession};
use plainmed_core::{
    ConditionSelection, Language, NewPersonalInfo, PersonalInfo, PersonalInfoForm,
    PersonalInfoStatus, SearchRequest, SearchResponse, Topic, WizardStep,
    error::DUPLICATE_PERSONAL_INFO,
};

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeBackend {
    topics: Vec<Topic>,
    personal_info: Mutex<Option<PersonalInfo>>,
    history: Mutex<Vec<ConditionSelection>>,
    create_calls: Mutex<usize>,
    fail_next_create: Mutex<bool>,
    fail_saves: Mutex<bool>,
}

impl FakeBackend {
    fn with_topics(topics: Vec<Topic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    fn create_calls(&self) -> usize {
        *self.create_calls.lock().unwrap()
    }
}

#[async_trait]
impl SurveyBackend for FakeBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let query = request.query.to_lowercase();
        let results = self
            .topics
            .iter()
            .filter(|t| t.language == request.language && t.title.to_lowercase().contains(&query))
            .take(request.limit() as usize)
            .cloned()
            .collect();
        Ok(SearchResponse {
            source: "fake".to_string(),
            results,
        })
    }

    async fn personal_info(&self, _user_id: &str) -> Result<PersonalInfoStatus, ClientError> {
        Ok(self.personal_info.lock().unwrap().clone().into())
    }

    async fn create_personal_info(
        &self,
        info: &NewPersonalInfo,
    ) -> Result<PersonalInfo, ClientError> {
        *self.create_calls.lock().unwrap() += 1;

        let mut fail = self.fail_next_create.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(ClientError::Rejected {
                status: 500,
                message: "Operation failed".to_string(),
            });
        }

        let mut row = self.personal_info.lock().unwrap();
        if row.is_some() {
            return Err(ClientError::Duplicate(DUPLICATE_PERSONAL_INFO.to_string()));
        }
        let created = PersonalInfo {
            id: 1,
            user_id: info.user_id.clone(),
            age_range: info.age_range,
            gender: info.gender,
            language: info.language,
        };
        *row = Some(created.clone());
        Ok(created)
    }

    async fn medical_history(
        &self,
        _user_id: &str,
    ) -> Result<Vec<ConditionSelection>, ClientError> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn save_medical_history(
        &self,
        _user_id: &str,
        conditions: &[ConditionSelection],
    ) -> Result<(), ClientError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(ClientError::Rejected {
                status: 500,
                message: "Operation failed".to_string(),
            });
        }
        *self.history.lock().unwrap() = conditions.to_vec();
        Ok(())
    }
}

fn spanish_form() -> PersonalInfoForm {
    PersonalInfoForm::new("35-44", "female", "Spanish")
}

fn english_form() -> PersonalInfoForm {
    PersonalInfoForm::new("18-24", "male", "English")
}

// ---------------------------------------------------------------------------
// Personal info step
// ---------------------------------------------------------------------------

#[tokio::test]
async fn spanish_user_sees_spanish_labels_with_fallback() {
    let mut session = SurveySession::new(FakeBackend::default(), "user-es");

    session.submit_personal_info(&spanish_form()).await.unwrap();
    assert_eq!(session.step(), WizardStep::MedicalHistory);
    assert_eq!(session.display_language(), Language::Spanish);

    assert!(session.add_taxonomy_condition("HP001"));
    assert!(session.add_condition(ConditionSelection::new("Gout", "X42")));

    assert_eq!(session.selected_labels(), vec!["Presión Arterial Alta", "Gout"]);
}

#[tokio::test]
async fn invalid_form_keeps_first_step() {
    let mut session = SurveySession::new(FakeBackend::default(), "user-1");
    let form = PersonalInfoForm::new("", "female", "English");

    let err = session.submit_personal_info(&form).await.unwrap_err();

    assert!(matches!(err, SessionError::Validation(_)));
    assert_eq!(session.step(), WizardStep::PersonalInfo);
    assert_eq!(session.backend().create_calls(), 0);
}

#[tokio::test]
async fn duplicate_row_shows_notice_and_stays() {
    let backend = FakeBackend::default();
    *backend.personal_info.lock().unwrap() = Some(PersonalInfo {
        id: 7,
        user_id: "user-1".to_string(),
        age_range: "25-34".parse().unwrap(),
        gender: "other".parse().unwrap(),
        language: Language::English,
    });
    // Session started without resuming, so it does not know the row exists.
    let mut session = SurveySession::new(backend, "user-1");

    let err = session.submit_personal_info(&english_form()).await.unwrap_err();

    assert!(matches!(err, SessionError::Backend(ClientError::Duplicate(_))));
    assert_eq!(session.step(), WizardStep::PersonalInfo);
    assert_eq!(session.notice(), Some(DUPLICATE_PERSONAL_INFO));
}

#[tokio::test]
async fn failed_save_can_be_retried_by_hand() {
    let backend = FakeBackend::default();
    *backend.fail_next_create.lock().unwrap() = true;
    let mut session = SurveySession::new(backend, "user-1");

    assert!(session.submit_personal_info(&english_form()).await.is_err());
    assert_eq!(session.step(), WizardStep::PersonalInfo);
    assert_eq!(
        session.take_notice().as_deref(),
        Some("Something went wrong. Please try again.")
    );
    assert_eq!(session.backend().create_calls(), 1);

    session.submit_personal_info(&english_form()).await.unwrap();
    assert_eq!(session.step(), WizardStep::MedicalHistory);
    assert_eq!(session.backend().create_calls(), 2);
    assert!(session.notice().is_none());
}

#[tokio::test]
async fn resume_prefills_and_skips_create() {
    let backend = FakeBackend::default();
    *backend.personal_info.lock().unwrap() = Some(PersonalInfo {
        id: 3,
        user_id: "user-1".to_string(),
        age_range: "45-54".parse().unwrap(),
        gender: "prefer-not-to-say".parse().unwrap(),
        language: Language::Spanish,
    });
    *backend.history.lock().unwrap() = vec![ConditionSelection::new("Asthma", "AS001").with_spanish("Asma")];

    let mut session = SurveySession::resume(backend, "user-1").await.unwrap();

    let form = session.personal_info_form();
    assert_eq!(form.age_range, "45-54");
    assert_eq!(form.language, "Spanish");
    assert_eq!(session.picker().selected().len(), 1);

    session.submit_personal_info(&form).await.unwrap();
    assert_eq!(session.step(), WizardStep::MedicalHistory);
    assert_eq!(session.backend().create_calls(), 0);
}

#[tokio::test]
async fn going_back_and_resubmitting_does_not_create_twice() {
    let mut session = SurveySession::new(FakeBackend::default(), "user-1");

    session.submit_personal_info(&english_form()).await.unwrap();
    session.previous().unwrap();
    assert_eq!(session.step(), WizardStep::PersonalInfo);

    session.submit_personal_info(&spanish_form()).await.unwrap();
    assert_eq!(session.step(), WizardStep::MedicalHistory);
    assert_eq!(session.backend().create_calls(), 1);
    assert_eq!(session.display_language(), Language::Spanish);
}

// ---------------------------------------------------------------------------
// Medical history step
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_suggestions_and_stale_results() {
    let backend = FakeBackend::with_topics(vec![
        Topic::new("T1", "Diabetes", Language::English),
        Topic::new("T2", "Diabetes Type 2", Language::English),
        Topic::new("T1", "Diabetes", Language::Spanish),
    ]);
    let mut session = SurveySession::new(backend, "user-1");
    session.submit_personal_info(&english_form()).await.unwrap();

    assert!(!session.search("d").await);
    assert!(session.search("diab").await);
    assert_eq!(session.picker().suggestions().len(), 2);

    let stale = session.query_changed("dia").unwrap();
    let latest = session.query_changed("diabetes type").unwrap();

    let stale_response = SearchResponse {
        source: "fake".to_string(),
        results: vec![Topic::new("T9", "Dialysis", Language::English)],
    };
    assert!(!session.apply_search(stale.seq, Ok(stale_response)));

    let latest_response = SearchResponse {
        source: "fake".to_string(),
        results: vec![Topic::new("T2", "Diabetes Type 2", Language::English)],
    };
    assert!(session.apply_search(latest.seq, Ok(latest_response)));

    let suggestions = session.picker().suggestions();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].concept_id, "T2");
}

#[tokio::test]
async fn submitting_history_saves_and_finishes() {
    let mut session = SurveySession::new(FakeBackend::default(), "user-1");
    session.submit_personal_info(&english_form()).await.unwrap();

    session.add_taxonomy_condition("DB001");
    session.add_taxonomy_condition("AS001");
    assert!(!session.add_taxonomy_condition("DB001"));
    assert!(session.remove_condition("AS001"));
    assert!(!session.remove_condition("AS001"));

    session.submit_medical_history().await.unwrap();

    assert_eq!(session.step(), WizardStep::Submitted);
    assert_eq!(session.draft().conditions.len(), 1);
    let saved = session.backend().history.lock().unwrap().clone();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].concept_id, "DB001");
}

#[tokio::test]
async fn failed_history_save_stays_on_second_step() {
    let backend = FakeBackend::default();
    *backend.fail_saves.lock().unwrap() = true;
    let mut session = SurveySession::new(backend, "user-1");
    session.submit_personal_info(&english_form()).await.unwrap();
    session.add_taxonomy_condition("OS001");

    let err = session.submit_medical_history().await.unwrap_err();

    assert!(matches!(err, SessionError::Backend(_)));
    assert_eq!(session.step(), WizardStep::MedicalHistory);
    assert!(session.notice().is_some());
    assert_eq!(session.picker().selected().len(), 1);
}

#[tokio::test]
async fn history_cannot_be_submitted_from_first_step() {
    let mut session = SurveySession::new(FakeBackend::default(), "user-1");

    let err = session.submit_medical_history().await.unwrap_err();

    assert!(matches!(err, SessionError::Wizard(_)));
    assert_eq!(session.step(), WizardStep::PersonalInfo);
}
