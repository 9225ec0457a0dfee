//! Task repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Task, TaskStatus};

/// Filter criteria for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Restrict to a single user's tasks.
    pub user_id: Option<Uuid>,
    /// Restrict to any of these statuses (empty = all statuses).
    pub statuses: Vec<TaskStatus>,
    /// Maximum rows returned.
    pub limit: Option<i64>,
}

impl TaskFilter {
    /// Tasks due for processing: pending plus stuck in_progress, which the
    /// orchestrator resumes idempotently.
    pub fn due(limit: i64) -> Self {
        Self {
            user_id: None,
            statuses: vec![TaskStatus::Pending, TaskStatus::InProgress],
            limit: Some(limit),
        }
    }

    /// Pending tasks only (backlog check).
    pub fn pending() -> Self {
        Self {
            user_id: None,
            statuses: vec![TaskStatus::Pending],
            limit: None,
        }
    }
}

/// Repository interface for Task persistence.
///
/// `list` returns tasks in creation order (oldest first) so batch
/// processing drains the backlog fairly.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task.
    async fn insert(&self, task: &Task) -> DomainResult<()>;

    /// Get a task by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Task>>;

    /// Update an existing task.
    async fn update(&self, task: &Task) -> DomainResult<()>;

    /// List tasks with optional filters, oldest first.
    async fn list(&self, filter: TaskFilter) -> DomainResult<Vec<Task>>;

    /// Count tasks matching filters.
    async fn count(&self, filter: TaskFilter) -> DomainResult<i64>;
}
