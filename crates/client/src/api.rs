//! HTTP client for the PlainMed API

use async_trait::async_trait;
use plainmed_core::{
    ConditionSelection, ErrorBody, MedicalHistory, NewPersonalInfo, PersonalInfo,
    PersonalInfoStatus, SearchRequest, SearchResponse, error::DUPLICATE_PERSONAL_INFO,
};
use reqwest::{StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::backend::SurveyBackend;
use crate::config::ApiConfig;
use crate::error::ClientError;

#[derive(Serialize)]
struct SaveHistoryRequest<'a> {
    conditions: &'a [ConditionSelection],
}

/// Client for the search, personal-info and medical-history endpoints
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Client for `ApiConfig::from_env()`
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&ApiConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST /search
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint(&["search"]))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// GET /personal-info/{user_id}
    pub async fn personal_info(&self, user_id: &str) -> Result<PersonalInfoStatus, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["personal-info", user_id]))
            .send()
            .await?;
        decode(response).await
    }

    /// POST /personal-info
    pub async fn create_personal_info(
        &self,
        info: &NewPersonalInfo,
    ) -> Result<PersonalInfo, ClientError> {
        let response = self
            .http
            .post(self.endpoint(&["personal-info"]))
            .json(info)
            .send()
            .await?;
        decode(response).await
    }

    /// GET /medical-history/{user_id}
    pub async fn medical_history(&self, user_id: &str) -> Result<MedicalHistory, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["medical-history", user_id]))
            .send()
            .await?;
        decode(response).await
    }

    /// PUT /medical-history/{user_id}
    pub async fn save_medical_history(
        &self,
        user_id: &str,
        conditions: &[ConditionSelection],
    ) -> Result<MedicalHistory, ClientError> {
        let response = self
            .http
            .put(self.endpoint(&["medical-history", user_id]))
            .json(&SaveHistoryRequest { conditions })
            .send()
            .await?;
        decode(response).await
    }

    /// Base URL with `segments` appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Decode a success body, or turn the `{error}` body into a `ClientError`
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    tracing::debug!(status = status.as_u16(), message = %message, "API request rejected");

    if status == StatusCode::BAD_REQUEST && message == DUPLICATE_PERSONAL_INFO {
        return Err(ClientError::Duplicate(message));
    }
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SurveyBackend for ApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        ApiClient::search(self, request).await
    }

    async fn personal_info(&self, user_id: &str) -> Result<PersonalInfoStatus, ClientError> {
        ApiClient::personal_info(self, user_id).await
    }

    async fn create_personal_info(
        &self,
        info: &NewPersonalInfo,
    ) -> Result<PersonalInfo, ClientError> {
        ApiClient::create_personal_info(self, info).await
    }

    async fn medical_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConditionSelection>, ClientError> {
        Ok(ApiClient::medical_history(self, user_id).await?.conditions)
    }

    async fn save_medical_history(
        &self,
        user_id: &str,
        conditions: &[ConditionSelection],
    ) -> Result<(), ClientError> {
        ApiClient::save_medical_history(self, user_id, conditions).await?;
        Ok(())
    }
}
