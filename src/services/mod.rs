//! Service layer: the decision core of the persona network.

pub mod dream;
pub mod outcome;
pub mod processor;
pub mod prompt;
pub mod selector;
pub mod spawner;

pub use dream::{DreamCycleConfig, DreamCycleService, DreamReport, DreamSummary};
pub use outcome::{classify, TaskOutcome};
pub use processor::{ProcessSummary, ProcessorConfig, TaskProcessor, TaskReport};
pub use selector::select_persona;
pub use spawner::{extract_directives, PersonaSpawner, SpawnDirective};
