use deadpool_postgres::Pool;

use super::StoreError;

/// Tables used by the service. `MEDLINEPLUS` is filled by the ingestion job;
/// it is created here only so a fresh database can serve (empty) searches.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "MEDLINEPLUS" (
    topic_id          TEXT NOT NULL,
    title             TEXT NOT NULL,
    language          TEXT NOT NULL,
    url               TEXT,
    meta_desc         TEXT,
    full_summary      TEXT,
    aliases           JSONB,
    mesh_headings     JSONB,
    "groups"          JSONB,
    primary_institute JSONB,
    date_created      TEXT,
    PRIMARY KEY (topic_id, language)
);

CREATE TABLE IF NOT EXISTS personal_info (
    id         BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    user_id    TEXT NOT NULL UNIQUE,
    age_range  TEXT NOT NULL,
    gender     TEXT NOT NULL,
    language   TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS medical_history (
    user_id       TEXT NOT NULL,
    concept_id    TEXT NOT NULL,
    name          TEXT NOT NULL,
    name_es       TEXT,
    semantic_type TEXT NOT NULL,
    sources       TEXT NOT NULL,
    position      INTEGER NOT NULL,
    PRIMARY KEY (user_id, concept_id)
);
"#;

/// Create missing tables. Safe to run on every startup.
pub async fn migrate(pool: &Pool) -> Result<(), StoreError> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA).await?;
    tracing::info!("Database schema ready");
    Ok(())
}
