//! Domain errors for the ZeroVector persona network.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur in the ZeroVector system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Persona not found: {0}")]
    PersonaNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("Memory not found: {0}")]
    MemoryNotFound(Uuid),

    #[error("Dream session not found: {0}")]
    DreamSessionNotFound(Uuid),

    #[error("Invalid state transition from {from} to {to}: {reason}")]
    InvalidStateTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Completion failed: {0}")]
    CompletionFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
