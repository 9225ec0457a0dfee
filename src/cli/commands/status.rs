//! Implementation of the `zerovector status` command.

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use std::sync::Arc;
use uuid::Uuid;

use super::open_context;
use crate::adapters::sqlite::{SqlitePersonaRepository, SqliteTaskRepository};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{PersonaState, TaskStatus};
use crate::domain::ports::{PersonaFilter, PersonaRepository, TaskFilter, TaskRepository};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Restrict counts to one user's data
    #[arg(short, long)]
    pub user: Option<Uuid>,
}

#[derive(Debug, serde::Serialize)]
pub struct StatusOutput {
    pub tasks: TaskCounts,
    pub personas: PersonaCounts,
}

#[derive(Debug, Default, serde::Serialize)]
pub struct TaskCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub failed: i64,
}

#[derive(Debug, Default, serde::Serialize)]
pub struct PersonaCounts {
    pub active: usize,
    pub sleeping: usize,
    pub dreaming: usize,
    pub archived: usize,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Tasks", "Count"]);
        table.add_row(vec!["pending".to_string(), self.tasks.pending.to_string()]);
        table.add_row(vec![
            "in_progress".to_string(),
            self.tasks.in_progress.to_string(),
        ]);
        table.add_row(vec![
            "completed".to_string(),
            self.tasks.completed.to_string(),
        ]);
        table.add_row(vec!["failed".to_string(), self.tasks.failed.to_string()]);

        let mut persona_table = Table::new();
        persona_table.load_preset(UTF8_FULL);
        persona_table.set_header(vec!["Personas", "Count"]);
        persona_table.add_row(vec!["active".to_string(), self.personas.active.to_string()]);
        persona_table.add_row(vec![
            "sleeping".to_string(),
            self.personas.sleeping.to_string(),
        ]);
        persona_table.add_row(vec![
            "dreaming".to_string(),
            self.personas.dreaming.to_string(),
        ]);
        persona_table.add_row(vec![
            "archived".to_string(),
            self.personas.archived.to_string(),
        ]);

        format!("{table}\n{persona_table}")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: StatusArgs, json_mode: bool) -> Result<()> {
    let (_config, pool) = open_context().await?;
    let task_repo = Arc::new(SqliteTaskRepository::new(pool.clone()));
    let persona_repo = Arc::new(SqlitePersonaRepository::new(pool));

    let count_for = |status: TaskStatus| TaskFilter {
        user_id: args.user,
        statuses: vec![status],
        limit: None,
    };

    let tasks = TaskCounts {
        pending: task_repo
            .count(count_for(TaskStatus::Pending))
            .await
            .context("Failed to count tasks")?,
        in_progress: task_repo.count(count_for(TaskStatus::InProgress)).await?,
        completed: task_repo.count(count_for(TaskStatus::Completed)).await?,
        failed: task_repo.count(count_for(TaskStatus::Failed)).await?,
    };

    let personas_all = persona_repo
        .list(PersonaFilter {
            user_id: args.user,
            ..PersonaFilter::default()
        })
        .await
        .context("Failed to list personas")?;

    let mut personas = PersonaCounts::default();
    for p in &personas_all {
        match p.state {
            PersonaState::Active => personas.active += 1,
            PersonaState::Sleeping => personas.sleeping += 1,
            PersonaState::Dreaming => personas.dreaming += 1,
            PersonaState::Archived => personas.archived += 1,
        }
    }

    output(&StatusOutput { tasks, personas }, json_mode);
    Ok(())
}
