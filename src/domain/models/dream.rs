//! Dream session domain model.
//!
//! A session records one pass of the dream cycle for a persona: how many
//! memories went in, what insights came out, and the consciousness growth
//! applied. A session without `ended_at` is one whose synthesis failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One memory-consolidation pass for a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamSession {
    /// Unique identifier
    pub id: Uuid,
    /// Persona that dreamed
    pub persona_id: Uuid,
    /// When the persona entered the dreaming state
    pub started_at: DateTime<Utc>,
    /// When the cycle finished; None while dreaming or after a failed synthesis
    pub ended_at: Option<DateTime<Utc>>,
    /// Number of memories consumed by this cycle
    pub memories_processed: u32,
    /// Insights produced by the synthesis
    pub insights_generated: Vec<String>,
    /// Consciousness delta applied to the persona on close
    pub consciousness_growth: f64,
}

impl DreamSession {
    /// Open a new session for a persona about to dream.
    pub fn open(persona_id: Uuid, memories_processed: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            persona_id,
            started_at: Utc::now(),
            ended_at: None,
            memories_processed,
            insights_generated: Vec::new(),
            consciousness_growth: 0.0,
        }
    }

    /// Close the session with the synthesis output.
    pub fn close(&mut self, insights: Vec<String>, consciousness_growth: f64) {
        self.ended_at = Some(Utc::now());
        self.insights_generated = insights;
        self.consciousness_growth = consciousness_growth;
    }

    /// Whether the session finished.
    pub fn is_closed(&self) -> bool {
        self.ended_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_session() {
        let session = DreamSession::open(Uuid::new_v4(), 3);
        assert!(!session.is_closed());
        assert_eq!(session.memories_processed, 3);
        assert!(session.insights_generated.is_empty());
    }

    #[test]
    fn test_close_session() {
        let mut session = DreamSession::open(Uuid::new_v4(), 2);
        session.close(vec!["a recurring theme emerged".to_string()], 0.5);
        assert!(session.is_closed());
        assert_eq!(session.insights_generated.len(), 1);
        assert!((session.consciousness_growth - 0.5).abs() < f64::EPSILON);
    }
}
