use std::str::FromStr;

use async_trait::async_trait;
use deadpool_postgres::Pool;
use plainmed_core::{
    ConditionSelection, NewPersonalInfo, PersonalInfo, SearchRequest, Topic, search::like_pattern,
};
use tokio_postgres::{Row, error::SqlState};

use super::{Store, StoreError};

const TOPIC_COLUMNS: &str = r#"topic_id, title, language, url, meta_desc, full_summary,
    aliases, mesh_headings, "groups", primary_institute, date_created"#;

const PERSONAL_INFO_COLUMNS: &str = "id, user_id, age_range, gender, language";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }

    async fn search_topics(&self, request: &SearchRequest) -> Result<Vec<Topic>, StoreError> {
        let client = self.pool.get().await?;
        let sql = format!(
            r#"SELECT {TOPIC_COLUMNS} FROM "MEDLINEPLUS"
               WHERE title ILIKE $1 AND language = $2
               LIMIT $3"#
        );
        let rows = client
            .query(
                &sql,
                &[
                    &like_pattern(&request.query),
                    &request.language.as_str(),
                    &i64::from(request.limit()),
                ],
            )
            .await?;

        rows.iter().map(topic_from_row).collect()
    }

    async fn languages(&self) -> Result<Vec<String>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"SELECT DISTINCT language FROM "MEDLINEPLUS" ORDER BY language"#,
                &[],
            )
            .await?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    async fn find_personal_info(&self, user_id: &str) -> Result<Option<PersonalInfo>, StoreError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {PERSONAL_INFO_COLUMNS} FROM personal_info WHERE user_id = $1");
        let row = client.query_opt(&sql, &[&user_id]).await?;

        row.as_ref().map(personal_info_from_row).transpose()
    }

    async fn insert_personal_info(
        &self,
        info: &NewPersonalInfo,
    ) -> Result<PersonalInfo, StoreError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO personal_info (user_id, age_range, gender, language)
             VALUES ($1, $2, $3, $4)
             RETURNING {PERSONAL_INFO_COLUMNS}"
        );
        let result = client
            .query_one(
                &sql,
                &[
                    &info.user_id,
                    &info.age_range.as_str(),
                    &info.gender.as_str(),
                    &info.language.as_str(),
                ],
            )
            .await;

        match result {
            Ok(row) => personal_info_from_row(&row),
            Err(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
                Err(StoreError::Duplicate(info.user_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn medical_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConditionSelection>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT name, name_es, concept_id, semantic_type, sources
                 FROM medical_history WHERE user_id = $1 ORDER BY position",
                &[&user_id],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| ConditionSelection {
                name: row.get("name"),
                name_es: row.get("name_es"),
                concept_id: row.get("concept_id"),
                semantic_type: row.get("semantic_type"),
                sources: row.get("sources"),
            })
            .collect())
    }

    async fn replace_medical_history(
        &self,
        user_id: &str,
        conditions: &[ConditionSelection],
    ) -> Result<(), StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        tx.execute("DELETE FROM medical_history WHERE user_id = $1", &[&user_id])
            .await?;
        let insert = tx
            .prepare(
                "INSERT INTO medical_history
                 (user_id, concept_id, name, name_es, semantic_type, sources, position)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .await?;
        for (position, condition) in conditions.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| StoreError::Corrupt("too many conditions".into()))?;
            tx.execute(
                &insert,
                &[
                    &user_id,
                    &condition.concept_id,
                    &condition.name,
                    &condition.name_es,
                    &condition.semantic_type,
                    &condition.sources,
                    &position,
                ],
            )
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

fn parse_column<T>(row: &Row, column: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.get(column);
    raw.parse()
        .map_err(|e: T::Err| StoreError::Corrupt(format!("{column}: {e}")))
}

fn topic_from_row(row: &Row) -> Result<Topic, StoreError> {
    Ok(Topic {
        topic_id: row.get("topic_id"),
        title: row.get("title"),
        language: parse_column(row, "language")?,
        url: row.get("url"),
        meta_desc: row.get("meta_desc"),
        full_summary: row.get("full_summary"),
        aliases: row.get("aliases"),
        mesh_headings: row.get("mesh_headings"),
        groups: row.get("groups"),
        primary_institute: row.get("primary_institute"),
        date_created: row.get("date_created"),
    })
}

fn personal_info_from_row(row: &Row) -> Result<PersonalInfo, StoreError> {
    Ok(PersonalInfo {
        id: row.get("id"),
        user_id: row.get("user_id"),
        age_range: parse_column(row, "age_range")?,
        gender: parse_column(row, "gender")?,
        language: parse_column(row, "language")?,
    })
}
