//! SQLite implementation of the MemoryRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{parse_datetime, parse_json_or_default, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Memory, MemoryType};
use crate::domain::ports::MemoryRepository;

#[derive(Clone)]
pub struct SqliteMemoryRepository {
    pool: SqlitePool,
}

impl SqliteMemoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemoryRepository for SqliteMemoryRepository {
    async fn insert(&self, memory: &Memory) -> DomainResult<()> {
        let tags_json = serde_json::to_string(&memory.tags)?;

        sqlx::query(
            r#"INSERT INTO memories (id, persona_id, memory_type, content, importance_score,
               emotional_weight, dream_processed, tags, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(memory.id.to_string())
        .bind(memory.persona_id.to_string())
        .bind(memory.memory_type.as_str())
        .bind(&memory.content)
        .bind(memory.importance_score)
        .bind(memory.emotional_weight)
        .bind(memory.dream_processed)
        .bind(tags_json)
        .bind(memory.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Memory>> {
        let row: Option<MemoryRow> = sqlx::query_as("SELECT * FROM memories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_by_persona(&self, persona_id: Uuid) -> DomainResult<Vec<Memory>> {
        let rows: Vec<MemoryRow> =
            sqlx::query_as("SELECT * FROM memories WHERE persona_id = ? ORDER BY created_at DESC")
                .bind(persona_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_unprocessed(&self, persona_id: Uuid) -> DomainResult<Vec<Memory>> {
        let rows: Vec<MemoryRow> = sqlx::query_as(
            "SELECT * FROM memories WHERE persona_id = ? AND dream_processed = 0
             ORDER BY created_at ASC",
        )
        .bind(persona_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn mark_dream_processed(&self, ids: &[Uuid]) -> DomainResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("UPDATE memories SET dream_processed = 1 WHERE id IN ({placeholders})");

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.to_string());
        }
        query.execute(&self.pool).await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct MemoryRow {
    id: String,
    persona_id: String,
    memory_type: String,
    content: String,
    importance_score: f64,
    emotional_weight: f64,
    dream_processed: bool,
    tags: Option<String>,
    created_at: String,
}

impl TryFrom<MemoryRow> for Memory {
    type Error = DomainError;

    fn try_from(row: MemoryRow) -> Result<Self, Self::Error> {
        Ok(Memory {
            id: parse_uuid(&row.id)?,
            persona_id: parse_uuid(&row.persona_id)?,
            memory_type: MemoryType::from_str(&row.memory_type).ok_or_else(|| {
                DomainError::SerializationError(format!("unknown memory type: {}", row.memory_type))
            })?,
            content: row.content,
            importance_score: row.importance_score,
            emotional_weight: row.emotional_weight,
            dream_processed: row.dream_processed,
            tags: parse_json_or_default(row.tags)?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}
