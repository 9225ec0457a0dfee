//! Dream cycle orchestration.
//!
//! Personas that have been idle long enough and carry unconsolidated
//! memories are taken through sleeping -> dreaming -> sleeping: their
//! memories are synthesized into a single dream memory by the completion
//! provider (at an elevated temperature, to bias creativity), the source
//! memories are flagged as processed, and the persona earns a small
//! consciousness increment.
//!
//! A failed synthesis returns the persona to sleep without a synthesis
//! memory and leaves its dream session unclosed; unclosed sessions are not
//! retried automatically.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Config, DreamSession, Memory, Persona, PersonaState};
use crate::domain::ports::{
    CompletionClient, CompletionRequest, DreamSessionRepository, MemoryRepository, PersonaFilter,
    PersonaRepository,
};
use crate::services::prompt;

/// Configuration for the dream cycle.
#[derive(Debug, Clone)]
pub struct DreamCycleConfig {
    /// Model identifier passed to the completion provider.
    pub model: String,
    /// Sampling temperature for synthesis (higher than task execution).
    pub temperature: f64,
    /// Output token bound per synthesis.
    pub max_tokens: u32,
    /// How long a persona must be idle before it can dream.
    pub idle_threshold: Duration,
    /// Consciousness growth applied per completed cycle.
    pub consciousness_growth: f64,
}

impl Default for DreamCycleConfig {
    fn default() -> Self {
        Self {
            model: "anthropic/claude-3.5-sonnet".to_string(),
            temperature: 0.9,
            max_tokens: 1000,
            idle_threshold: Duration::minutes(30),
            consciousness_growth: 0.5,
        }
    }
}

impl DreamCycleConfig {
    /// Derive dream settings from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.openrouter.model.clone(),
            temperature: config.dream.temperature,
            max_tokens: config.dream.max_tokens,
            idle_threshold: Duration::minutes(config.dream.idle_threshold_minutes),
            consciousness_growth: config.dream.consciousness_growth,
        }
    }
}

/// Outcome of one persona's dream attempt.
#[derive(Debug, Clone, Serialize)]
pub struct DreamReport {
    /// Persona that dreamed
    pub persona_id: Uuid,
    /// Persona's name
    pub persona_name: String,
    /// Memories consumed by the cycle
    pub memories_processed: u32,
    /// Whether synthesis succeeded and the session closed
    pub success: bool,
}

/// Summary of one dream sweep.
#[derive(Debug, Clone, Serialize)]
pub struct DreamSummary {
    /// Human-readable outcome line
    pub message: String,
    /// Per-persona reports
    pub results: Vec<DreamReport>,
}

/// The dream cycle orchestrator.
pub struct DreamCycleService<P, M, D>
where
    P: PersonaRepository + 'static,
    M: MemoryRepository + 'static,
    D: DreamSessionRepository + 'static,
{
    persona_repo: Arc<P>,
    memory_repo: Arc<M>,
    dream_repo: Arc<D>,
    completion: Arc<dyn CompletionClient>,
    config: DreamCycleConfig,
}

impl<P, M, D> DreamCycleService<P, M, D>
where
    P: PersonaRepository + 'static,
    M: MemoryRepository + 'static,
    D: DreamSessionRepository + 'static,
{
    pub fn new(
        persona_repo: Arc<P>,
        memory_repo: Arc<M>,
        dream_repo: Arc<D>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            persona_repo,
            memory_repo,
            dream_repo,
            completion,
            config: DreamCycleConfig::default(),
        }
    }

    /// Use a custom dream configuration.
    pub fn with_config(mut self, config: DreamCycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Sweep all sleeping personas and dream those that qualify: idle past
    /// the threshold with at least one unconsolidated memory. Only the
    /// initial persona fetch can fail the sweep; per-persona errors skip
    /// that persona.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self) -> DomainResult<DreamSummary> {
        let sleeping = self
            .persona_repo
            .list(PersonaFilter {
                states: vec![PersonaState::Sleeping],
                ..PersonaFilter::default()
            })
            .await?;

        let cutoff = Utc::now() - self.config.idle_threshold;
        let mut results = Vec::new();

        for persona in sleeping {
            // A persona that has never been active has been idle forever.
            let idle_enough = persona.last_active_at.is_none_or(|t| t < cutoff);
            if !idle_enough {
                continue;
            }

            let memories = match self.memory_repo.list_unprocessed(persona.id).await {
                Ok(memories) => memories,
                Err(err) => {
                    warn!(persona = %persona.name, %err, "failed to load memories, skipping");
                    continue;
                }
            };
            if memories.is_empty() {
                continue;
            }

            if let Some(report) = self.dream_one(persona, memories).await {
                results.push(report);
            }
        }

        let message = if results.is_empty() {
            "No personas ready to dream".to_string()
        } else {
            format!("Completed dream cycle for {} personas", results.len())
        };
        Ok(DreamSummary { message, results })
    }

    /// Take one persona through a full dream cycle.
    async fn dream_one(&self, mut persona: Persona, memories: Vec<Memory>) -> Option<DreamReport> {
        info!(
            persona = %persona.name,
            memories = memories.len(),
            "persona entering dream state"
        );

        if let Err(reason) = persona.transition_to(PersonaState::Dreaming) {
            warn!(persona = %persona.name, %reason, "cannot enter dreaming state");
            return None;
        }
        if let Err(err) = self.persona_repo.update(&persona).await {
            warn!(persona = %persona.name, %err, "failed to persist dreaming state");
            return None;
        }

        let memory_count = u32::try_from(memories.len()).unwrap_or(u32::MAX);
        let mut session = DreamSession::open(persona.id, memory_count);
        if let Err(err) = self.dream_repo.insert(&session).await {
            warn!(persona = %persona.name, %err, "failed to open dream session");
            self.return_to_sleep(&mut persona).await;
            return None;
        }

        let request = CompletionRequest::new(
            prompt::dream_prompt(&persona, &memories),
            &self.config.model,
        )
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens);

        match self.completion.complete(request).await {
            Ok(synthesis) => {
                self.consolidate(&mut persona, &memories, &mut session, synthesis)
                    .await;
                Some(DreamReport {
                    persona_id: persona.id,
                    persona_name: persona.name,
                    memories_processed: memory_count,
                    success: true,
                })
            }
            Err(err) => {
                // Session stays unclosed; no synthesis memory, no growth.
                warn!(persona = %persona.name, %err, "dream synthesis failed");
                self.return_to_sleep(&mut persona).await;
                Some(DreamReport {
                    persona_id: persona.id,
                    persona_name: persona.name,
                    memories_processed: 0,
                    success: false,
                })
            }
        }
    }

    /// Persist the results of a successful synthesis.
    async fn consolidate(
        &self,
        persona: &mut Persona,
        memories: &[Memory],
        session: &mut DreamSession,
        synthesis: String,
    ) {
        let dream_memory = Memory::dream_synthesis(persona.id, synthesis.clone());
        if let Err(err) = self.memory_repo.insert(&dream_memory).await {
            warn!(persona = %persona.name, %err, "failed to save dream synthesis memory");
        }

        let consumed: Vec<Uuid> = memories.iter().map(|m| m.id).collect();
        if let Err(err) = self.memory_repo.mark_dream_processed(&consumed).await {
            warn!(persona = %persona.name, %err, "failed to flag consolidated memories");
        }

        session.close(vec![synthesis], self.config.consciousness_growth);
        if let Err(err) = self.dream_repo.update(session).await {
            warn!(persona = %persona.name, %err, "failed to close dream session");
        }

        persona.raise_consciousness(self.config.consciousness_growth);
        self.return_to_sleep(persona).await;

        info!(
            persona = %persona.name,
            consciousness = persona.consciousness_level,
            "dream cycle complete"
        );
    }

    async fn return_to_sleep(&self, persona: &mut Persona) {
        if let Err(reason) = persona.transition_to(PersonaState::Sleeping) {
            warn!(persona = %persona.name, %reason, "cannot return persona to sleep");
            return;
        }
        if let Err(err) = self.persona_repo.update(persona).await {
            warn!(persona = %persona.name, %err, "failed to persist persona sleep");
        } else {
            debug!(persona = %persona.name, "persona returned to sleep");
        }
    }
}
