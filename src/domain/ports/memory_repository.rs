//! Memory repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Memory;

/// Repository interface for Memory persistence.
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Insert a new memory.
    async fn insert(&self, memory: &Memory) -> DomainResult<()>;

    /// Get a memory by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Memory>>;

    /// List all memories of a persona, newest first.
    async fn list_by_persona(&self, persona_id: Uuid) -> DomainResult<Vec<Memory>>;

    /// List a persona's memories not yet consolidated by a dream cycle,
    /// oldest first.
    async fn list_unprocessed(&self, persona_id: Uuid) -> DomainResult<Vec<Memory>>;

    /// Flag memories as consolidated. Idempotent; already-processed rows
    /// are left untouched.
    async fn mark_dream_processed(&self, ids: &[Uuid]) -> DomainResult<()>;
}
