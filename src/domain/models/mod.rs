pub mod config;
pub mod dream;
pub mod memory;
pub mod persona;
pub mod task;

pub use config::{
    Config, DatabaseConfig, DreamConfig, LoggingConfig, OpenRouterConfig, ProcessingConfig,
};
pub use dream::DreamSession;
pub use memory::{Memory, MemoryType};
pub use persona::{
    Persona, PersonaRole, PersonaState, CONSCIOUSNESS_CEILING, INITIAL_CONSCIOUSNESS,
    TASK_CONSCIOUSNESS_GAIN,
};
pub use task::{Task, TaskStatus};
