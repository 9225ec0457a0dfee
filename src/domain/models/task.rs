//! Task domain model.
//!
//! Tasks are units of work submitted by a user and routed to personas.
//! The status machine is linear: pending -> in_progress -> completed | failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a task in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting for a persona assignment
    Pending,
    /// Assigned and being processed
    InProgress,
    /// Finished with a result judged successful
    Completed,
    /// Finished unsuccessfully (or abandoned after an error)
    Failed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" | "complete" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Check if this is a terminal state. Finished tasks are never reopened.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Valid transitions from this status.
    pub fn valid_transitions(&self) -> Vec<TaskStatus> {
        match self {
            Self::Pending => vec![Self::InProgress, Self::Failed],
            Self::InProgress => vec![Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => vec![],
        }
    }

    pub fn can_transition_to(&self, new_status: Self) -> bool {
        self.valid_transitions().contains(&new_status)
    }
}

/// A unit of work routed through the persona network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Short title
    pub title: String,
    /// Full description of the work
    pub description: String,
    /// Current status
    pub status: TaskStatus,
    /// Persona this task is assigned to, once selected
    pub assigned_to: Option<Uuid>,
    /// Free-text result, set exactly once on completion or failure
    pub result: Option<String>,
    /// Advisory deadline; not enforced by processing
    pub deadline: Option<DateTime<Utc>>,
    /// When created
    pub created_at: DateTime<Utc>,
    /// When the task reached a terminal status
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new pending task.
    pub fn new(user_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: description.into(),
            status: TaskStatus::default(),
            assigned_to: None,
            result: None,
            deadline: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Set an advisory deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Pre-assign to a persona (status stays pending until processed).
    pub fn with_assignment(mut self, persona_id: Uuid) -> Self {
        self.assigned_to = Some(persona_id);
        self
    }

    /// Combined title + description text used for routing heuristics.
    pub fn routing_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Check if can transition to given status.
    pub fn can_transition_to(&self, new_status: TaskStatus) -> bool {
        self.status.can_transition_to(new_status)
    }

    /// Transition to a new status.
    pub fn transition_to(&mut self, new_status: TaskStatus) -> Result<(), String> {
        if !self.can_transition_to(new_status) {
            return Err(format!(
                "Cannot transition task from {} to {}",
                self.status.as_str(),
                new_status.as_str()
            ));
        }
        self.status = new_status;
        if new_status.is_terminal() {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }

    /// Assign to a persona and move to in_progress.
    pub fn start(&mut self, persona_id: Uuid) -> Result<(), String> {
        self.transition_to(TaskStatus::InProgress)?;
        self.assigned_to = Some(persona_id);
        Ok(())
    }

    /// Record a successful result. Sets `result` and `completed_at` together.
    pub fn complete(&mut self, result: impl Into<String>) -> Result<(), String> {
        self.transition_to(TaskStatus::Completed)?;
        self.result = Some(result.into());
        Ok(())
    }

    /// Record a failed result. The result text is kept when one was produced.
    pub fn fail(&mut self, result: Option<String>) -> Result<(), String> {
        self.transition_to(TaskStatus::Failed)?;
        self.result = result;
        Ok(())
    }

    /// Check if task is terminal.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Validate task.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Task title cannot be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Task description cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task::new(Uuid::new_v4(), "Test task", "Do the thing")
    }

    #[test]
    fn test_new_task_is_pending() {
        let t = task();
        assert_eq!(t.status, TaskStatus::Pending);
        assert!(t.assigned_to.is_none());
        assert!(t.result.is_none());
        assert!(t.completed_at.is_none());
    }

    #[test]
    fn test_full_lifecycle() {
        let mut t = task();
        let persona_id = Uuid::new_v4();

        t.start(persona_id).unwrap();
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(t.assigned_to, Some(persona_id));

        t.complete("All done, delivered the implementation").unwrap();
        assert_eq!(t.status, TaskStatus::Completed);
        assert!(t.result.is_some());
        assert!(t.completed_at.is_some());
    }

    #[test]
    fn test_failure_keeps_result_when_present() {
        let mut t = task();
        t.start(Uuid::new_v4()).unwrap();
        t.fail(Some("could not proceed".to_string())).unwrap();
        assert_eq!(t.status, TaskStatus::Failed);
        assert_eq!(t.result.as_deref(), Some("could not proceed"));
        assert!(t.completed_at.is_some());
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut t = task();
        t.start(Uuid::new_v4()).unwrap();
        t.complete("done and delivered").unwrap();

        assert!(t.transition_to(TaskStatus::Pending).is_err());
        assert!(t.transition_to(TaskStatus::InProgress).is_err());
        assert!(t.transition_to(TaskStatus::Failed).is_err());
    }

    #[test]
    fn test_cannot_complete_pending_task() {
        let mut t = task();
        assert!(t.transition_to(TaskStatus::Completed).is_err());
    }

    #[test]
    fn test_routing_text_joins_title_and_description() {
        let t = Task::new(Uuid::new_v4(), "Plan roadmap", "with strategy");
        assert_eq!(t.routing_text(), "Plan roadmap with strategy");
    }

    #[test]
    fn test_validation() {
        let t = Task::new(Uuid::new_v4(), " ", "desc");
        assert!(t.validate().is_err());
        let t = Task::new(Uuid::new_v4(), "title", "");
        assert!(t.validate().is_err());
        assert!(task().validate().is_ok());
    }
}
