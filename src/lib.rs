//! ZeroVector - Persona Task-Routing Engine
//!
//! ZeroVector manages a per-user hierarchy of persona agents (conductor ->
//! department heads -> sub-agents), routes pending tasks to the
//! best-matched persona, produces results through a language-model
//! completion provider, and consolidates idle personas' memories through
//! periodic dream cycles.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic and domain models
//! - **Service Layer** (`services`): The decision core - selection,
//!   classification, spawning, and the two orchestrators
//! - **Adapters** (`adapters`): SQLite persistence implementations
//! - **Infrastructure Layer** (`infrastructure`): OpenRouter client and
//!   configuration management
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, DreamSession, Memory, MemoryType, Persona, PersonaRole, PersonaState, Task, TaskStatus,
};
pub use domain::ports::{
    CompletionClient, CompletionError, CompletionRequest, DreamSessionRepository, MemoryRepository,
    PersonaFilter, PersonaRepository, TaskFilter, TaskRepository,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{classify, select_persona, DreamCycleService, TaskOutcome, TaskProcessor};
