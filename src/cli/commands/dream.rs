//! Implementation of the `zerovector dream` command.

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;

use super::open_context;
use crate::adapters::sqlite::{
    SqliteDreamSessionRepository, SqliteMemoryRepository, SqlitePersonaRepository,
};
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::openrouter::OpenRouterClient;
use crate::services::{DreamCycleConfig, DreamCycleService, DreamSummary};

#[derive(Args, Debug)]
pub struct DreamArgs {
    /// Override the idle threshold in minutes (0 dreams every idle persona)
    #[arg(long)]
    pub idle_minutes: Option<i64>,
}

#[derive(Debug, serde::Serialize)]
pub struct DreamOutput {
    pub summary: DreamSummary,
}

impl CommandOutput for DreamOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.summary.message.clone()];
        for report in &self.summary.results {
            let verdict = if report.success { "synthesized" } else { "failed" };
            lines.push(format!(
                "  {} {} ({} memories)",
                report.persona_name, verdict, report.memories_processed
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: DreamArgs, json_mode: bool) -> Result<()> {
    let (config, pool) = open_context().await?;

    let persona_repo = Arc::new(SqlitePersonaRepository::new(pool.clone()));
    let memory_repo = Arc::new(SqliteMemoryRepository::new(pool.clone()));
    let dream_repo = Arc::new(SqliteDreamSessionRepository::new(pool));

    let completion = Arc::new(
        OpenRouterClient::new(&config.openrouter).context("Failed to build completion client")?,
    );

    let mut dream_config = DreamCycleConfig::from_config(&config);
    if let Some(minutes) = args.idle_minutes {
        dream_config.idle_threshold = chrono::Duration::minutes(minutes);
    }

    let service = DreamCycleService::new(persona_repo, memory_repo, dream_repo, completion)
        .with_config(dream_config);
    let summary = service.run_cycle().await.context("Dream cycle failed")?;

    output(&DreamOutput { summary }, json_mode);
    Ok(())
}
