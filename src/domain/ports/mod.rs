//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that infrastructure adapters implement:
//! - `PersonaRepository`, `TaskRepository`, `MemoryRepository`,
//!   `DreamSessionRepository`: persistence operations for the four tables
//! - `CompletionClient`: language-model completion
//!
//! These contracts keep the decision core independent of any specific
//! store or provider; tests instantiate isolated in-memory implementations.

pub mod completion_client;
pub mod dream_repository;
pub mod memory_repository;
pub mod persona_repository;
pub mod task_repository;

pub use completion_client::{CompletionClient, CompletionError, CompletionRequest};
pub use dream_repository::DreamSessionRepository;
pub use memory_repository::MemoryRepository;
pub use persona_repository::{PersonaFilter, PersonaRepository};
pub use task_repository::{TaskFilter, TaskRepository};
