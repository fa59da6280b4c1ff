//! Storage seam for topics, personal info and medical history
//!
//! Handlers only see `Arc<dyn Store>`. `PgStore` is the production backend;
//! `MemoryStore` serves local development without a database and the tests.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::migrate;

use std::sync::Arc;

use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, Runtime};
use plainmed_core::{
    ConditionSelection, NewPersonalInfo, PersonalInfo, SearchRequest, Topic,
};
use thiserror::Error;
use tokio_postgres::NoTls;

/// Store shared by all handlers
pub type SharedStore = Arc<dyn Store>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("personal info already exists for user {0}")]
    Duplicate(String),

    #[error("database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Name reported as `source` in search responses
    fn name(&self) -> &'static str;

    /// Cheap connectivity check for `/health`
    async fn ping(&self) -> Result<(), StoreError>;

    /// Topics whose title contains the query (case-insensitive) in the
    /// requested language, at most `request.limit()` of them
    async fn search_topics(&self, request: &SearchRequest) -> Result<Vec<Topic>, StoreError>;

    /// Distinct values of the topics' language column
    async fn languages(&self) -> Result<Vec<String>, StoreError>;

    async fn find_personal_info(&self, user_id: &str) -> Result<Option<PersonalInfo>, StoreError>;

    /// Insert a row; fails with [`StoreError::Duplicate`] if the user already has one
    async fn insert_personal_info(&self, info: &NewPersonalInfo)
    -> Result<PersonalInfo, StoreError>;

    /// Saved conditions in the order they were selected
    async fn medical_history(&self, user_id: &str)
    -> Result<Vec<ConditionSelection>, StoreError>;

    /// Replace the user's whole selection set
    async fn replace_medical_history(
        &self,
        user_id: &str,
        conditions: &[ConditionSelection],
    ) -> Result<(), StoreError>;
}

/// Create a connection pool from a database URL
pub async fn create_pool(database_url: &str) -> Result<Pool, deadpool_postgres::CreatePoolError> {
    let mut cfg = Config::new();
    cfg.url = Some(database_url.to_string());
    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
}
