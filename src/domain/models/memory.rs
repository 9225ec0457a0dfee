//! Memory domain model.
//!
//! Every persona accumulates memories as it works: core identity memories
//! at creation, task results, spawning experiences, and dream syntheses.
//! Unprocessed memories are the raw material of the dream cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of memory content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    /// Identity memory written at persona creation
    Core,
    /// Notable event, e.g. spawning new specialists
    Experience,
    /// Result of a completed task
    TaskResult,
    /// Consolidated insight produced by a dream cycle
    DreamSynthesis,
}

impl MemoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Experience => "experience",
            Self::TaskResult => "task_result",
            Self::DreamSynthesis => "dream_synthesis",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "core" => Some(Self::Core),
            "experience" => Some(Self::Experience),
            "task_result" => Some(Self::TaskResult),
            "dream_synthesis" => Some(Self::DreamSynthesis),
            _ => None,
        }
    }
}

/// A memory entry belonging to a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    /// Unique identifier
    pub id: Uuid,
    /// Owning persona
    pub persona_id: Uuid,
    /// Type of memory
    pub memory_type: MemoryType,
    /// Free-text content
    pub content: String,
    /// Importance in [0, 1]
    pub importance_score: f64,
    /// Signed emotional valence, typically [-1, 1]
    pub emotional_weight: f64,
    /// Whether a dream cycle has already consolidated this memory.
    /// Dream syntheses are born processed and are never consolidated again.
    pub dream_processed: bool,
    /// Optional tags
    pub tags: Vec<String>,
    /// When created
    pub created_at: DateTime<Utc>,
}

impl Memory {
    fn new_with_type(persona_id: Uuid, memory_type: MemoryType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            persona_id,
            memory_type,
            content: content.into(),
            importance_score: 0.5,
            emotional_weight: 0.0,
            dream_processed: matches!(memory_type, MemoryType::DreamSynthesis),
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Core identity memory, written at persona creation.
    pub fn core(persona_id: Uuid, content: impl Into<String>) -> Self {
        let mut mem = Self::new_with_type(persona_id, MemoryType::Core, content);
        mem.importance_score = 1.0;
        mem
    }

    /// Memory of a completed task and its result.
    pub fn task_result(persona_id: Uuid, content: impl Into<String>) -> Self {
        let mut mem = Self::new_with_type(persona_id, MemoryType::TaskResult, content);
        mem.importance_score = 0.8;
        mem.emotional_weight = 0.5;
        mem
    }

    /// Memory of a notable experience, e.g. spawning specialists.
    pub fn experience(persona_id: Uuid, content: impl Into<String>) -> Self {
        let mut mem = Self::new_with_type(persona_id, MemoryType::Experience, content);
        mem.importance_score = 0.8;
        mem.emotional_weight = 0.5;
        mem
    }

    /// Consolidated memory produced by a dream cycle. Always created with
    /// `dream_processed` set so it never feeds a later cycle.
    pub fn dream_synthesis(persona_id: Uuid, content: impl Into<String>) -> Self {
        let mut mem = Self::new_with_type(persona_id, MemoryType::DreamSynthesis, content);
        mem.importance_score = 0.9;
        mem
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set importance score.
    pub fn with_importance(mut self, score: f64) -> Self {
        self.importance_score = score.clamp(0.0, 1.0);
        self
    }

    /// Set emotional weight.
    pub fn with_emotional_weight(mut self, weight: f64) -> Self {
        self.emotional_weight = weight;
        self
    }

    /// Validate memory.
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Memory content cannot be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.importance_score) {
            return Err(format!(
                "Memory importance_score out of range: {}",
                self.importance_score
            ));
        }
        Ok(())
    }
}
