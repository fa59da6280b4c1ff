use async_trait::async_trait;
use plainmed_core::{
    ConditionSelection, NewPersonalInfo, PersonalInfo, PersonalInfoStatus, SearchRequest,
    SearchResponse,
};

use crate::error::ClientError;

/// Operations a survey session needs from the service
#[async_trait]
pub trait SurveyBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError>;

    async fn personal_info(&self, user_id: &str) -> Result<PersonalInfoStatus, ClientError>;

    async fn create_personal_info(
        &self,
        info: &NewPersonalInfo,
    ) -> Result<PersonalInfo, ClientError>;

    async fn medical_history(&self, user_id: &str)
    -> Result<Vec<ConditionSelection>, ClientError>;

    async fn save_medical_history(
        &self,
        user_id: &str,
        conditions: &[ConditionSelection],
    ) -> Result<(), ClientError>;
}
