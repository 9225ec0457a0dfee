//! Implementation of the `zerovector task` commands.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use std::sync::Arc;
use uuid::Uuid;

use super::open_context;
use crate::adapters::sqlite::SqliteTaskRepository;
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{Task, TaskStatus};
use crate::domain::ports::{TaskFilter, TaskRepository};

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Submit a new task to the network
    Create {
        /// Task title
        title: String,

        /// Full description of the work
        description: String,

        /// Assign to a specific persona instead of automatic routing
        #[arg(short, long)]
        assign_to: Option<Uuid>,

        /// Advisory deadline (RFC 3339)
        #[arg(short, long)]
        deadline: Option<DateTime<Utc>>,

        /// Owning user ID (defaults to the local user)
        #[arg(short, long)]
        user: Option<Uuid>,
    },

    /// List tasks
    List {
        /// Filter by status (pending, in_progress, completed, failed)
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by owning user ID
        #[arg(short, long)]
        user: Option<Uuid>,
    },

    /// Show details for a specific task
    Show {
        /// Task ID
        task_id: Uuid,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct TaskCreateOutput {
    pub task: Task,
}

impl CommandOutput for TaskCreateOutput {
    fn to_human(&self) -> String {
        format!(
            "Task \"{}\" assigned to the consciousness network (id {})",
            self.task.title, self.task.id
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TaskListOutput {
    pub tasks: Vec<Task>,
}

impl CommandOutput for TaskListOutput {
    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks found".to_string();
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["ID", "Title", "Status", "Assigned", "Created"]);

        for t in &self.tasks {
            table.add_row(vec![
                t.id.to_string(),
                truncate(&t.title, 40),
                t.status.as_str().to_string(),
                t.assigned_to
                    .map_or_else(|| "-".to_string(), |id| id.to_string()),
                t.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }

        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TaskShowOutput {
    pub task: Task,
}

impl CommandOutput for TaskShowOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Task: {}", self.task.title),
            format!("ID: {}", self.task.id),
            format!("Status: {}", self.task.status.as_str()),
            format!("Description: {}", self.task.description),
        ];
        if let Some(assigned) = self.task.assigned_to {
            lines.push(format!("Assigned to: {assigned}"));
        }
        if let Some(completed_at) = self.task.completed_at {
            lines.push(format!("Completed at: {completed_at}"));
        }
        if let Some(result) = &self.task.result {
            lines.push(format!("Result:\n{result}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(command: TaskCommands, json_mode: bool) -> Result<()> {
    let (_config, pool) = open_context().await?;
    let task_repo = Arc::new(SqliteTaskRepository::new(pool));

    match command {
        TaskCommands::Create {
            title,
            description,
            assign_to,
            deadline,
            user,
        } => {
            let user_id = user.unwrap_or(Uuid::nil());
            let mut task = Task::new(user_id, title, description);
            if let Some(persona_id) = assign_to {
                task = task.with_assignment(persona_id);
            }
            if let Some(deadline) = deadline {
                task = task.with_deadline(deadline);
            }

            task.validate()
                .map_err(|reason| anyhow!("invalid task: {reason}"))?;
            task_repo
                .insert(&task)
                .await
                .context("Failed to create task")?;

            output(&TaskCreateOutput { task }, json_mode);
        }

        TaskCommands::List { status, user } => {
            let statuses = match status {
                Some(s) => {
                    let parsed = TaskStatus::from_str(&s)
                        .ok_or_else(|| anyhow!("unknown task status: {s}"))?;
                    vec![parsed]
                }
                None => Vec::new(),
            };
            let tasks = task_repo
                .list(TaskFilter {
                    user_id: user,
                    statuses,
                    limit: None,
                })
                .await
                .context("Failed to list tasks")?;
            output(&TaskListOutput { tasks }, json_mode);
        }

        TaskCommands::Show { task_id } => {
            let task = task_repo
                .get(task_id)
                .await
                .context("Failed to load task")?
                .ok_or_else(|| anyhow!("task not found: {task_id}"))?;
            output(&TaskShowOutput { task }, json_mode);
        }
    }

    Ok(())
}
