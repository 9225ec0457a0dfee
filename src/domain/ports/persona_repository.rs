//! Persona repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Persona, PersonaRole, PersonaState};

/// Filter criteria for listing personas.
#[derive(Debug, Clone, Default)]
pub struct PersonaFilter {
    /// Restrict to a single user's personas.
    pub user_id: Option<Uuid>,
    /// Restrict to any of these states (empty = all states).
    pub states: Vec<PersonaState>,
    /// Restrict to a role.
    pub role: Option<PersonaRole>,
}

impl PersonaFilter {
    /// Personas of one user that can currently be assigned work.
    pub fn selectable_for(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            states: vec![PersonaState::Active, PersonaState::Sleeping],
            role: None,
        }
    }
}

/// Repository interface for Persona persistence.
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Insert a new persona.
    async fn insert(&self, persona: &Persona) -> DomainResult<()>;

    /// Get a persona by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Persona>>;

    /// Update an existing persona.
    async fn update(&self, persona: &Persona) -> DomainResult<()>;

    /// List personas with optional filters.
    async fn list(&self, filter: PersonaFilter) -> DomainResult<Vec<Persona>>;
}
