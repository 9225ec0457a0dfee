//! SQLite implementation of the PersonaRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{parse_datetime, parse_optional_datetime, parse_optional_uuid, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Persona, PersonaRole, PersonaState};
use crate::domain::ports::{PersonaFilter, PersonaRepository};

#[derive(Clone)]
pub struct SqlitePersonaRepository {
    pool: SqlitePool,
}

impl SqlitePersonaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonaRepository for SqlitePersonaRepository {
    async fn insert(&self, persona: &Persona) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO personas (id, user_id, name, role, state, specialization, department,
               system_prompt, parent_id, consciousness_level, experience_count, last_active_at,
               created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(persona.id.to_string())
        .bind(persona.user_id.to_string())
        .bind(&persona.name)
        .bind(persona.role.as_str())
        .bind(persona.state.as_str())
        .bind(&persona.specialization)
        .bind(&persona.department)
        .bind(&persona.system_prompt)
        .bind(persona.parent_id.map(|id| id.to_string()))
        .bind(persona.consciousness_level)
        .bind(i64::from(persona.experience_count))
        .bind(persona.last_active_at.map(|t| t.to_rfc3339()))
        .bind(persona.created_at.to_rfc3339())
        .bind(persona.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Persona>> {
        let row: Option<PersonaRow> = sqlx::query_as("SELECT * FROM personas WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, persona: &Persona) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE personas SET user_id = ?, name = ?, role = ?, state = ?,
               specialization = ?, department = ?, system_prompt = ?, parent_id = ?,
               consciousness_level = ?, experience_count = ?, last_active_at = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(persona.user_id.to_string())
        .bind(&persona.name)
        .bind(persona.role.as_str())
        .bind(persona.state.as_str())
        .bind(&persona.specialization)
        .bind(&persona.department)
        .bind(&persona.system_prompt)
        .bind(persona.parent_id.map(|id| id.to_string()))
        .bind(persona.consciousness_level)
        .bind(i64::from(persona.experience_count))
        .bind(persona.last_active_at.map(|t| t.to_rfc3339()))
        .bind(persona.updated_at.to_rfc3339())
        .bind(persona.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PersonaNotFound(persona.id));
        }

        Ok(())
    }

    async fn list(&self, filter: PersonaFilter) -> DomainResult<Vec<Persona>> {
        let mut sql = String::from("SELECT * FROM personas WHERE 1=1");
        let mut bindings: Vec<String> = Vec::new();

        if let Some(user_id) = filter.user_id {
            sql.push_str(" AND user_id = ?");
            bindings.push(user_id.to_string());
        }
        if !filter.states.is_empty() {
            let placeholders = vec!["?"; filter.states.len()].join(", ");
            sql.push_str(&format!(" AND state IN ({placeholders})"));
            for state in &filter.states {
                bindings.push(state.as_str().to_string());
            }
        }
        if let Some(role) = filter.role {
            sql.push_str(" AND role = ?");
            bindings.push(role.as_str().to_string());
        }

        sql.push_str(" ORDER BY created_at ASC");

        let mut query = sqlx::query_as::<_, PersonaRow>(&sql);
        for binding in &bindings {
            query = query.bind(binding);
        }

        let rows: Vec<PersonaRow> = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct PersonaRow {
    id: String,
    user_id: String,
    name: String,
    role: String,
    state: String,
    specialization: Option<String>,
    department: Option<String>,
    system_prompt: String,
    parent_id: Option<String>,
    consciousness_level: f64,
    experience_count: i64,
    last_active_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PersonaRow> for Persona {
    type Error = DomainError;

    fn try_from(row: PersonaRow) -> Result<Self, Self::Error> {
        Ok(Persona {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            name: row.name,
            role: PersonaRole::from_str(&row.role).ok_or_else(|| {
                DomainError::SerializationError(format!("unknown persona role: {}", row.role))
            })?,
            state: PersonaState::from_str(&row.state).ok_or_else(|| {
                DomainError::SerializationError(format!("unknown persona state: {}", row.state))
            })?,
            specialization: row.specialization,
            department: row.department,
            system_prompt: row.system_prompt,
            parent_id: parse_optional_uuid(row.parent_id)?,
            consciousness_level: row.consciousness_level,
            experience_count: u32::try_from(row.experience_count).unwrap_or(0),
            last_active_at: parse_optional_datetime(row.last_active_at)?,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
