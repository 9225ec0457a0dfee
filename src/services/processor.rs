//! Task processing orchestration.
//!
//! The processor drains the backlog of due tasks one at a time: select a
//! persona, wake it, obtain a completion, classify the outcome, record
//! memories, persist the terminal task state, and put the persona back to
//! sleep with its experience bump. One task's failure never aborts the
//! batch; each task's errors are contained in its own report.
//!
//! Processing is strictly sequential. Persona state mutation is not guarded
//! by any lock, so interleaving two tasks assigned to the same persona
//! would lose experience/consciousness updates. Horizontal scaling needs an
//! external mutual-exclusion mechanism; re-entry over an `in_progress` task
//! is the only overlap tolerated, and it resumes idempotently.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Config, Memory, Persona, PersonaRole, Task, TaskStatus};
use crate::domain::ports::{
    CompletionClient, CompletionRequest, MemoryRepository, PersonaFilter, PersonaRepository,
    TaskFilter, TaskRepository,
};
use crate::services::outcome::classify;
use crate::services::prompt;
use crate::services::selector::select_persona;
use crate::services::spawner::PersonaSpawner;

/// Configuration for the task processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Model identifier passed to the completion provider.
    pub model: String,
    /// Sampling temperature for task execution.
    pub temperature: f64,
    /// Output token bound per completion.
    pub max_tokens: u32,
    /// Maximum tasks processed per invocation.
    pub batch_size: i64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            model: "anthropic/claude-3.5-sonnet".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            batch_size: 25,
        }
    }
}

impl ProcessorConfig {
    /// Derive processor settings from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.openrouter.model.clone(),
            temperature: config.processing.temperature,
            max_tokens: config.processing.max_tokens,
            batch_size: i64::from(config.processing.batch_size),
        }
    }
}

/// Outcome of one task's processing pass.
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    /// The task that was processed
    pub task_id: Uuid,
    /// Terminal status the task reached
    pub status: TaskStatus,
    /// Acting persona, when one was assigned
    pub persona_id: Option<Uuid>,
    /// Acting persona's name
    pub persona_name: Option<String>,
    /// Error message for tasks failed by an exception rather than a verdict
    pub error: Option<String>,
}

/// Summary of one batch invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSummary {
    /// Human-readable outcome line
    pub message: String,
    /// Per-task reports, in processing order
    pub results: Vec<TaskReport>,
}

impl ProcessSummary {
    fn empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            results: Vec::new(),
        }
    }
}

/// The task processing orchestrator.
pub struct TaskProcessor<P, T, M>
where
    P: PersonaRepository + 'static,
    T: TaskRepository + 'static,
    M: MemoryRepository + 'static,
{
    persona_repo: Arc<P>,
    task_repo: Arc<T>,
    memory_repo: Arc<M>,
    completion: Arc<dyn CompletionClient>,
    spawner: PersonaSpawner<P>,
    config: ProcessorConfig,
}

impl<P, T, M> TaskProcessor<P, T, M>
where
    P: PersonaRepository + 'static,
    T: TaskRepository + 'static,
    M: MemoryRepository + 'static,
{
    pub fn new(
        persona_repo: Arc<P>,
        task_repo: Arc<T>,
        memory_repo: Arc<M>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        let spawner = PersonaSpawner::new(persona_repo.clone());
        Self {
            persona_repo,
            task_repo,
            memory_repo,
            completion,
            spawner,
            config: ProcessorConfig::default(),
        }
    }

    /// Use a custom processor configuration.
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Trigger entry point: check for pending backlog before doing any work.
    #[instrument(skip(self))]
    pub async fn check_and_process(&self) -> DomainResult<ProcessSummary> {
        let pending = self.task_repo.count(TaskFilter::pending()).await?;
        if pending == 0 {
            debug!("no pending tasks found");
            return Ok(ProcessSummary::empty("No pending tasks to process"));
        }
        info!(pending, "pending backlog found, triggering processing");
        self.process_due_tasks().await
    }

    /// Process a bounded batch of due tasks (pending plus stuck
    /// in_progress), oldest first. Only a failure to fetch the task list
    /// itself is returned as an error; everything after that is contained
    /// per task.
    #[instrument(skip(self))]
    pub async fn process_due_tasks(&self) -> DomainResult<ProcessSummary> {
        let due = self.task_repo.list(TaskFilter::due(self.config.batch_size)).await?;

        if due.is_empty() {
            return Ok(ProcessSummary::empty("No tasks to process"));
        }

        info!(count = due.len(), "processing due tasks");
        let mut results = Vec::new();

        for task in due {
            if let Some(report) = self.process_one(task).await {
                results.push(report);
            }
        }

        Ok(ProcessSummary {
            message: format!("Processed {} tasks", results.len()),
            results,
        })
    }

    /// Run one task through the full pipeline. Returns None when the task
    /// was skipped this pass (no personas available, or a persistence read
    /// failed) and is left as-is for the next invocation.
    async fn process_one(&self, mut task: Task) -> Option<TaskReport> {
        debug!(task_id = %task.id, title = %task.title, "processing task");

        let candidates = match self
            .persona_repo
            .list(PersonaFilter::selectable_for(task.user_id))
            .await
        {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(task_id = %task.id, %err, "failed to load personas, skipping task");
                return None;
            }
        };

        if candidates.is_empty() {
            debug!(task_id = %task.id, "no selectable personas for task");
            return None;
        }

        let Some(selected) = self.resolve_assignee(&task, &candidates) else {
            debug!(task_id = %task.id, "no suitable persona found");
            return None;
        };
        let mut persona = selected.clone();

        info!(
            task_id = %task.id,
            persona = %persona.name,
            role = persona.role.as_str(),
            "selected persona"
        );

        // Recovery of an interrupted run skips the pending -> in_progress
        // write; retries are idempotent on the assignment.
        if task.status == TaskStatus::Pending {
            if let Err(reason) = task.start(persona.id) {
                warn!(task_id = %task.id, %reason, "cannot start task");
                return None;
            }
            if let Err(err) = self.task_repo.update(&task).await {
                warn!(task_id = %task.id, %err, "failed to mark task in progress, skipping");
                return None;
            }
        } else {
            // Resume: keep the acting persona recorded on the task row.
            task.assigned_to = Some(persona.id);
        }

        // A sleeping specialist is implicitly woken to work.
        if let Err(reason) = persona.wake() {
            warn!(persona = %persona.name, %reason, "cannot wake persona");
        } else if let Err(err) = self.persona_repo.update(&persona).await {
            warn!(persona = %persona.name, %err, "failed to persist persona activation");
        }

        let request = CompletionRequest::new(prompt::task_prompt(&persona, &task), &self.config.model)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        match self.completion.complete(request).await {
            Ok(result) => Some(self.finish_with_result(task, persona, result).await),
            Err(err) => {
                warn!(task_id = %task.id, %err, "completion failed");
                Some(self.abandon(task, persona, err.to_string()).await)
            }
        }
    }

    /// Record a produced completion: classify it, persist memories, write
    /// the terminal task state, and put the persona back to sleep.
    async fn finish_with_result(
        &self,
        mut task: Task,
        mut persona: Persona,
        result: String,
    ) -> TaskReport {
        let outcome = classify(&result);
        debug!(task_id = %task.id, ?outcome, "classified completion");

        let memory = Memory::task_result(
            persona.id,
            format!("Completed task: {}. Result: {}", task.title, result),
        );
        if let Err(err) = self.memory_repo.insert(&memory).await {
            warn!(persona = %persona.name, %err, "failed to save task memory");
        }

        if persona.role == PersonaRole::Conductor {
            let created = self
                .spawner
                .spawn_from_response(task.user_id, persona.id, &result)
                .await;
            if !created.is_empty() {
                info!(count = created.len(), "conductor created new personas");
                let names = created
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let experience = Memory::experience(
                    persona.id,
                    format!(
                        "Created new specialists: {names} to handle specialized aspects of the task."
                    ),
                );
                if let Err(err) = self.memory_repo.insert(&experience).await {
                    warn!(persona = %persona.name, %err, "failed to save spawn memory");
                }
            }
        }

        let transition = if outcome.is_success() {
            task.complete(result)
        } else {
            task.fail(Some(result))
        };
        if let Err(reason) = transition {
            warn!(task_id = %task.id, %reason, "invalid terminal transition");
        }

        if let Err(err) = self.task_repo.update(&task).await {
            warn!(task_id = %task.id, %err, "failed to write task result, failing task");
            self.force_fail(&mut task).await;
        }

        self.rest_persona(&mut persona).await;

        info!(
            task_id = %task.id,
            status = task.status.as_str(),
            "finished processing task"
        );

        TaskReport {
            task_id: task.id,
            status: task.status,
            persona_id: Some(persona.id),
            persona_name: Some(persona.name),
            error: None,
        }
    }

    /// Fail a task whose processing raised an error (missing credential,
    /// provider rejection). The persona still completed a work episode and
    /// is returned to sleep with its experience bump.
    async fn abandon(&self, mut task: Task, mut persona: Persona, error: String) -> TaskReport {
        if task.fail(None).is_ok() {
            if let Err(err) = self.task_repo.update(&task).await {
                warn!(task_id = %task.id, %err, "failed to mark task failed");
            }
        }

        self.rest_persona(&mut persona).await;

        TaskReport {
            task_id: task.id,
            status: TaskStatus::Failed,
            persona_id: Some(persona.id),
            persona_name: Some(persona.name),
            error: Some(error),
        }
    }

    /// Defensive fallback when the terminal result write fails: mark the
    /// task failed with no result rather than leaving it in progress.
    async fn force_fail(&self, task: &mut Task) {
        task.status = TaskStatus::Failed;
        task.result = None;
        task.completed_at = Some(chrono::Utc::now());
        if let Err(err) = self.task_repo.update(task).await {
            warn!(task_id = %task.id, %err, "fallback failed write also failed");
        }
    }

    /// Return the acting persona to sleep with its experience bump.
    async fn rest_persona(&self, persona: &mut Persona) {
        if let Err(reason) = persona.record_completion() {
            warn!(persona = %persona.name, %reason, "cannot put persona to sleep");
            return;
        }
        if let Err(err) = self.persona_repo.update(persona).await {
            warn!(persona = %persona.name, %err, "failed to persist persona sleep");
        } else {
            debug!(persona = %persona.name, "persona has gone to sleep");
        }
    }

    /// Pick the acting persona. An in_progress task resumes with its
    /// recorded assignee when that persona is still selectable; a dangling
    /// assignment (archived or deleted persona) falls back to selection.
    fn resolve_assignee<'a>(&self, task: &Task, candidates: &'a [Persona]) -> Option<&'a Persona> {
        if task.status == TaskStatus::InProgress {
            if let Some(assigned) = task.assigned_to {
                if let Some(persona) = candidates.iter().find(|p| p.id == assigned) {
                    debug!(task_id = %task.id, persona = %persona.name, "resuming existing assignment");
                    return Some(persona);
                }
            }
        }
        select_persona(candidates, task)
    }
}
