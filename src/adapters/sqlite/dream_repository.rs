//! SQLite implementation of the DreamSessionRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{parse_datetime, parse_json_or_default, parse_optional_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DreamSession;
use crate::domain::ports::DreamSessionRepository;

#[derive(Clone)]
pub struct SqliteDreamSessionRepository {
    pool: SqlitePool,
}

impl SqliteDreamSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DreamSessionRepository for SqliteDreamSessionRepository {
    async fn insert(&self, session: &DreamSession) -> DomainResult<()> {
        let insights_json = serde_json::to_string(&session.insights_generated)?;

        sqlx::query(
            r#"INSERT INTO dream_sessions (id, persona_id, started_at, ended_at,
               memories_processed, insights_generated, consciousness_growth)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(session.persona_id.to_string())
        .bind(session.started_at.to_rfc3339())
        .bind(session.ended_at.map(|t| t.to_rfc3339()))
        .bind(i64::from(session.memories_processed))
        .bind(insights_json)
        .bind(session.consciousness_growth)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<DreamSession>> {
        let row: Option<DreamSessionRow> =
            sqlx::query_as("SELECT * FROM dream_sessions WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, session: &DreamSession) -> DomainResult<()> {
        let insights_json = serde_json::to_string(&session.insights_generated)?;

        let result = sqlx::query(
            r#"UPDATE dream_sessions SET persona_id = ?, started_at = ?, ended_at = ?,
               memories_processed = ?, insights_generated = ?, consciousness_growth = ?
               WHERE id = ?"#,
        )
        .bind(session.persona_id.to_string())
        .bind(session.started_at.to_rfc3339())
        .bind(session.ended_at.map(|t| t.to_rfc3339()))
        .bind(i64::from(session.memories_processed))
        .bind(insights_json)
        .bind(session.consciousness_growth)
        .bind(session.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DreamSessionNotFound(session.id));
        }

        Ok(())
    }

    async fn list_by_persona(&self, persona_id: Uuid) -> DomainResult<Vec<DreamSession>> {
        let rows: Vec<DreamSessionRow> = sqlx::query_as(
            "SELECT * FROM dream_sessions WHERE persona_id = ? ORDER BY started_at DESC",
        )
        .bind(persona_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_unclosed(&self) -> DomainResult<Vec<DreamSession>> {
        let rows: Vec<DreamSessionRow> = sqlx::query_as(
            "SELECT * FROM dream_sessions WHERE ended_at IS NULL ORDER BY started_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct DreamSessionRow {
    id: String,
    persona_id: String,
    started_at: String,
    ended_at: Option<String>,
    memories_processed: i64,
    insights_generated: Option<String>,
    consciousness_growth: f64,
}

impl TryFrom<DreamSessionRow> for DreamSession {
    type Error = DomainError;

    fn try_from(row: DreamSessionRow) -> Result<Self, Self::Error> {
        Ok(DreamSession {
            id: parse_uuid(&row.id)?,
            persona_id: parse_uuid(&row.persona_id)?,
            started_at: parse_datetime(&row.started_at)?,
            ended_at: parse_optional_datetime(row.ended_at)?,
            memories_processed: u32::try_from(row.memories_processed).unwrap_or(0),
            insights_generated: parse_json_or_default(row.insights_generated)?,
            consciousness_growth: row.consciousness_growth,
        })
    }
}
