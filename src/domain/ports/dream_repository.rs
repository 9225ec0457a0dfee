//! Dream session repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::DreamSession;

/// Repository interface for DreamSession persistence.
#[async_trait]
pub trait DreamSessionRepository: Send + Sync {
    /// Insert a new session.
    async fn insert(&self, session: &DreamSession) -> DomainResult<()>;

    /// Get a session by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<DreamSession>>;

    /// Update an existing session.
    async fn update(&self, session: &DreamSession) -> DomainResult<()>;

    /// List sessions of a persona, newest first.
    async fn list_by_persona(&self, persona_id: Uuid) -> DomainResult<Vec<DreamSession>>;

    /// Sessions that never closed (synthesis failed mid-cycle). These are
    /// not retried automatically; they remain observable here.
    async fn list_unclosed(&self) -> DomainResult<Vec<DreamSession>>;
}
