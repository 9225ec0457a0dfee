//! Implementation of the `zerovector process` command: the scheduler
//! trigger surface. Checks for backlog, drains the due-task batch, then
//! runs the dream cycle (unless skipped).

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;

use super::open_context;
use crate::adapters::sqlite::{
    SqliteDreamSessionRepository, SqliteMemoryRepository, SqlitePersonaRepository,
    SqliteTaskRepository,
};
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::openrouter::OpenRouterClient;
use crate::services::{
    DreamCycleConfig, DreamCycleService, DreamSummary, ProcessSummary, ProcessorConfig,
    TaskProcessor,
};

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Process due tasks even when the pending backlog check finds nothing
    /// (picks up stuck in_progress tasks)
    #[arg(long)]
    pub force: bool,

    /// Skip the dream cycle after task processing
    #[arg(long)]
    pub no_dream: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ProcessOutput {
    pub processing: ProcessSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dream: Option<DreamSummary>,
}

impl CommandOutput for ProcessOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.processing.message.clone()];
        for report in &self.processing.results {
            let persona = report.persona_name.as_deref().unwrap_or("-");
            let detail = report
                .error
                .as_deref()
                .map_or(String::new(), |e| format!(" ({e})"));
            lines.push(format!(
                "  {} -> {} [{}]{}",
                report.task_id,
                report.status.as_str(),
                persona,
                detail
            ));
        }
        if let Some(dream) = &self.dream {
            lines.push(dream.message.clone());
            for report in &dream.results {
                lines.push(format!(
                    "  {} consolidated {} memories",
                    report.persona_name, report.memories_processed
                ));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ProcessArgs, json_mode: bool) -> Result<()> {
    let (config, pool) = open_context().await?;

    let persona_repo = Arc::new(SqlitePersonaRepository::new(pool.clone()));
    let task_repo = Arc::new(SqliteTaskRepository::new(pool.clone()));
    let memory_repo = Arc::new(SqliteMemoryRepository::new(pool.clone()));
    let dream_repo = Arc::new(SqliteDreamSessionRepository::new(pool));

    let completion = Arc::new(
        OpenRouterClient::new(&config.openrouter).context("Failed to build completion client")?,
    );

    let processor = TaskProcessor::new(
        persona_repo.clone(),
        task_repo,
        memory_repo.clone(),
        completion.clone(),
    )
    .with_config(ProcessorConfig::from_config(&config));

    let processing = if args.force {
        processor.process_due_tasks().await
    } else {
        processor.check_and_process().await
    }
    .context("Task processing failed")?;

    let dream = if args.no_dream {
        None
    } else {
        let dream_service = DreamCycleService::new(persona_repo, memory_repo, dream_repo, completion)
            .with_config(DreamCycleConfig::from_config(&config));
        Some(dream_service.run_cycle().await.context("Dream cycle failed")?)
    };

    output(&ProcessOutput { processing, dream }, json_mode);
    Ok(())
}
