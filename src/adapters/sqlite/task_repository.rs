//! SQLite implementation of the TaskRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{parse_datetime, parse_optional_datetime, parse_optional_uuid, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Task, TaskStatus};
use crate::domain::ports::{TaskFilter, TaskRepository};

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn build_where(filter: &TaskFilter) -> (String, Vec<String>) {
        let mut clause = String::from(" WHERE 1=1");
        let mut bindings: Vec<String> = Vec::new();

        if let Some(user_id) = filter.user_id {
            clause.push_str(" AND user_id = ?");
            bindings.push(user_id.to_string());
        }
        if !filter.statuses.is_empty() {
            let placeholders = vec!["?"; filter.statuses.len()].join(", ");
            clause.push_str(&format!(" AND status IN ({placeholders})"));
            for status in &filter.statuses {
                bindings.push(status.as_str().to_string());
            }
        }

        (clause, bindings)
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, task: &Task) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO tasks (id, user_id, title, description, status, assigned_to,
               result, deadline, created_at, completed_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(task.id.to_string())
        .bind(task.user_id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.assigned_to.map(|id| id.to_string()))
        .bind(&task.result)
        .bind(task.deadline.map(|t| t.to_rfc3339()))
        .bind(task.created_at.to_rfc3339())
        .bind(task.completed_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, task: &Task) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE tasks SET user_id = ?, title = ?, description = ?, status = ?,
               assigned_to = ?, result = ?, deadline = ?, completed_at = ?
               WHERE id = ?"#,
        )
        .bind(task.user_id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.assigned_to.map(|id| id.to_string()))
        .bind(&task.result)
        .bind(task.deadline.map(|t| t.to_rfc3339()))
        .bind(task.completed_at.map(|t| t.to_rfc3339()))
        .bind(task.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(task.id));
        }

        Ok(())
    }

    async fn list(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        let (clause, bindings) = Self::build_where(&filter);
        let mut sql = format!("SELECT * FROM tasks{clause} ORDER BY created_at ASC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut query = sqlx::query_as::<_, TaskRow>(&sql);
        for binding in &bindings {
            query = query.bind(binding);
        }

        let rows: Vec<TaskRow> = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count(&self, filter: TaskFilter) -> DomainResult<i64> {
        let (clause, bindings) = Self::build_where(&filter);
        let sql = format!("SELECT COUNT(*) FROM tasks{clause}");

        let mut query = sqlx::query_as::<_, (i64,)>(&sql);
        for binding in &bindings {
            query = query.bind(binding);
        }

        let (count,) = query.fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    user_id: String,
    title: String,
    description: String,
    status: String,
    assigned_to: Option<String>,
    result: Option<String>,
    deadline: Option<String>,
    created_at: String,
    completed_at: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            title: row.title,
            description: row.description,
            status: TaskStatus::from_str(&row.status).ok_or_else(|| {
                DomainError::SerializationError(format!("unknown task status: {}", row.status))
            })?,
            assigned_to: parse_optional_uuid(row.assigned_to)?,
            result: row.result,
            deadline: parse_optional_datetime(row.deadline)?,
            created_at: parse_datetime(&row.created_at)?,
            completed_at: parse_optional_datetime(row.completed_at)?,
        })
    }
}
