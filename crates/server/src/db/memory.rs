use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use plainmed_core::{
    ConditionSelection, NewPersonalInfo, PersonalInfo, SearchRequest, Topic, search::title_matches,
};
use tokio::sync::RwLock;

use super::{Store, StoreError};

#[derive(Default)]
struct Tables {
    topics: Vec<Topic>,
    personal_info: HashMap<String, PersonalInfo>,
    medical_history: HashMap<String, Vec<ConditionSelection>>,
    last_id: i64,
}

/// Process-local store
///
/// Search returns topics in insertion order. The uniqueness check and the
/// insert of personal info happen under one write lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with topic rows
    pub fn with_topics(topics: Vec<Topic>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                topics,
                ..Tables::default()
            }),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn search_topics(&self, request: &SearchRequest) -> Result<Vec<Topic>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .topics
            .iter()
            .filter(|topic| topic.language == request.language)
            .filter(|topic| title_matches(&topic.title, &request.query))
            .take(request.limit() as usize)
            .cloned()
            .collect())
    }

    async fn languages(&self) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.read().await;
        let languages: BTreeSet<&str> = tables.topics.iter().map(|t| t.language.as_str()).collect();
        Ok(languages.into_iter().map(String::from).collect())
    }

    async fn find_personal_info(&self, user_id: &str) -> Result<Option<PersonalInfo>, StoreError> {
        Ok(self.tables.read().await.personal_info.get(user_id).cloned())
    }

    async fn insert_personal_info(
        &self,
        info: &NewPersonalInfo,
    ) -> Result<PersonalInfo, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.personal_info.contains_key(&info.user_id) {
            return Err(StoreError::Duplicate(info.user_id.clone()));
        }

        tables.last_id += 1;
        let row = PersonalInfo {
            id: tables.last_id,
            user_id: info.user_id.clone(),
            age_range: info.age_range,
            gender: info.gender,
            language: info.language,
        };
        tables.personal_info.insert(info.user_id.clone(), row.clone());
        Ok(row)
    }

    async fn medical_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConditionSelection>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .medical_history
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_medical_history(
        &self,
        user_id: &str,
        conditions: &[ConditionSelection],
    ) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .medical_history
            .insert(user_id.to_string(), conditions.to_vec());
        Ok(())
    }
}
