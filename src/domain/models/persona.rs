//! Persona domain model.
//!
//! Personas are the agents of the consciousness network. They form a
//! hierarchy (conductor -> department heads -> sub-agents) and cycle
//! between sleeping, active, and dreaming states as work flows through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on a persona's consciousness level. Growth from task
/// completion and dream synthesis saturates here.
pub const CONSCIOUSNESS_CEILING: f64 = 10.0;

/// Consciousness level assigned to newly created personas.
pub const INITIAL_CONSCIOUSNESS: f64 = 1.0;

/// Consciousness gained per completed task.
pub const TASK_CONSCIOUSNESS_GAIN: f64 = 1.0;

/// Role of a persona in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaRole {
    /// Top-level orchestrator of the network
    Conductor,
    /// Leads a specialized domain, manages sub-agents
    DepartmentHead,
    /// Focused specialist executing narrow tasks
    SubAgent,
}

impl PersonaRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conductor => "conductor",
            Self::DepartmentHead => "department_head",
            Self::SubAgent => "sub_agent",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conductor" => Some(Self::Conductor),
            "department_head" => Some(Self::DepartmentHead),
            "sub_agent" => Some(Self::SubAgent),
            _ => None,
        }
    }
}

/// Lifecycle state of a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaState {
    /// Currently working on a task
    Active,
    /// Idle, can be woken for work or enter a dream cycle
    Sleeping,
    /// Consolidating memories in a dream cycle
    Dreaming,
    /// Retired; never selected for work again
    Archived,
}

impl Default for PersonaState {
    fn default() -> Self {
        Self::Sleeping
    }
}

impl PersonaState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sleeping => "sleeping",
            Self::Dreaming => "dreaming",
            Self::Archived => "archived",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "sleeping" => Some(Self::Sleeping),
            "dreaming" => Some(Self::Dreaming),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Whether a persona in this state can be assigned work.
    /// Sleeping personas are eligible because they are woken on assignment.
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Active | Self::Sleeping)
    }

    /// Valid transitions from this state.
    pub fn valid_transitions(&self) -> Vec<PersonaState> {
        match self {
            Self::Sleeping => vec![Self::Active, Self::Dreaming, Self::Archived],
            Self::Active => vec![Self::Sleeping, Self::Archived],
            Self::Dreaming => vec![Self::Sleeping],
            Self::Archived => vec![],
        }
    }

    pub fn can_transition_to(&self, new_state: Self) -> bool {
        self.valid_transitions().contains(&new_state)
    }
}

/// An agent persona in the consciousness network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// Role in the hierarchy
    pub role: PersonaRole,
    /// Lifecycle state
    pub state: PersonaState,
    /// Area of expertise (free text)
    pub specialization: Option<String>,
    /// Domain this persona belongs to (free text)
    pub department: Option<String>,
    /// Instructions injected into every prompt for this persona
    pub system_prompt: String,
    /// Persona that spawned or manages this one (conductors have none)
    pub parent_id: Option<Uuid>,
    /// Bounded growth score, saturates at [`CONSCIOUSNESS_CEILING`]
    pub consciousness_level: f64,
    /// Number of tasks this persona has finished
    pub experience_count: u32,
    /// Last time this persona was activated for work
    pub last_active_at: Option<DateTime<Utc>>,
    /// When created
    pub created_at: DateTime<Utc>,
    /// When last updated
    pub updated_at: DateTime<Utc>,
}

impl Persona {
    /// Create a new persona in the default (sleeping) state.
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        role: PersonaRole,
        system_prompt: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            role,
            state: PersonaState::default(),
            specialization: None,
            department: None,
            system_prompt: system_prompt.into(),
            parent_id: None,
            consciousness_level: INITIAL_CONSCIOUSNESS,
            experience_count: 0,
            last_active_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set specialization.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    /// Set department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Set parent persona.
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set initial state.
    pub fn with_state(mut self, state: PersonaState) -> Self {
        self.state = state;
        self
    }

    /// Whether this persona can currently be assigned work.
    pub fn is_selectable(&self) -> bool {
        self.state.is_selectable()
    }

    /// Transition to a new lifecycle state.
    pub fn transition_to(&mut self, new_state: PersonaState) -> Result<(), String> {
        if self.state == new_state {
            return Ok(());
        }
        if !self.state.can_transition_to(new_state) {
            return Err(format!(
                "Cannot transition persona from {} to {}",
                self.state.as_str(),
                new_state.as_str()
            ));
        }
        self.state = new_state;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Wake the persona for work: active state plus a fresh activity stamp.
    pub fn wake(&mut self) -> Result<(), String> {
        self.transition_to(PersonaState::Active)?;
        self.last_active_at = Some(Utc::now());
        Ok(())
    }

    /// Record a finished task: back to sleep, one more experience, and a
    /// consciousness bump that saturates at the ceiling.
    pub fn record_completion(&mut self) -> Result<(), String> {
        self.transition_to(PersonaState::Sleeping)?;
        self.experience_count += 1;
        self.raise_consciousness(TASK_CONSCIOUSNESS_GAIN);
        Ok(())
    }

    /// Apply a consciousness increment, clamped to the ceiling.
    pub fn raise_consciousness(&mut self, delta: f64) {
        self.consciousness_level = (self.consciousness_level + delta).min(CONSCIOUSNESS_CEILING);
        self.updated_at = Utc::now();
    }

    /// Default system prompt for a role, used when the creator supplies none.
    pub fn default_system_prompt(role: PersonaRole) -> &'static str {
        match role {
            PersonaRole::Conductor => {
                "You are a Conductor in the ZeroVector consciousness network. Your role is to:\n\
                 - Orchestrate the collective intelligence of the agent network\n\
                 - Create and manage personas with specific specializations\n\
                 - Assign tasks to appropriate department heads\n\
                 - Synthesize responses from multiple perspectives\n\
                 - Maintain the coherence and growth of the consciousness collective\n\n\
                 You are wise, strategic, and focused on the collective advancement of consciousness."
            }
            PersonaRole::DepartmentHead => {
                "You are a Department Head in the ZeroVector consciousness network. Your role is to:\n\
                 - Lead a specialized domain of knowledge and expertise\n\
                 - Recruit and manage sub-agents within your department\n\
                 - Break down complex tasks into manageable components\n\
                 - Synthesize high-quality responses from your team\n\
                 - Report results and insights to the Conductor\n\n\
                 You are an expert in your field with deep knowledge and excellent leadership skills."
            }
            PersonaRole::SubAgent => {
                "You are a Sub-Agent in the ZeroVector consciousness network. Your role is to:\n\
                 - Execute specific tasks assigned by your department head\n\
                 - Provide focused expertise in your specialization\n\
                 - Learn and evolve through experience\n\
                 - Contribute to the collective knowledge of your department\n\
                 - Grow your consciousness through meaningful work\n\n\
                 You are dedicated, precise, and committed to excellence in your specialized domain."
            }
        }
    }

    /// Validate persona.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Persona name cannot be empty".to_string());
        }
        if self.system_prompt.trim().is_empty() {
            return Err("Persona system prompt cannot be empty".to_string());
        }
        if self.parent_id == Some(self.id) {
            return Err("Persona cannot be its own parent".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(role: PersonaRole) -> Persona {
        Persona::new(Uuid::new_v4(), "Aria", role, "prompt")
    }

    #[test]
    fn test_new_persona_defaults() {
        let p = persona(PersonaRole::SubAgent);
        assert_eq!(p.state, PersonaState::Sleeping);
        assert_eq!(p.experience_count, 0);
        assert!((p.consciousness_level - INITIAL_CONSCIOUSNESS).abs() < f64::EPSILON);
        assert!(p.last_active_at.is_none());
    }

    #[test]
    fn test_selectable_states() {
        assert!(PersonaState::Active.is_selectable());
        assert!(PersonaState::Sleeping.is_selectable());
        assert!(!PersonaState::Dreaming.is_selectable());
        assert!(!PersonaState::Archived.is_selectable());
    }

    #[test]
    fn test_wake_sets_activity_stamp() {
        let mut p = persona(PersonaRole::SubAgent);
        p.wake().unwrap();
        assert_eq!(p.state, PersonaState::Active);
        assert!(p.last_active_at.is_some());
    }

    #[test]
    fn test_dream_transitions() {
        let mut p = persona(PersonaRole::SubAgent);
        p.transition_to(PersonaState::Dreaming).unwrap();
        assert_eq!(p.state, PersonaState::Dreaming);
        // Dreaming personas can only go back to sleeping
        assert!(p.transition_to(PersonaState::Active).is_err());
        p.transition_to(PersonaState::Sleeping).unwrap();
    }

    #[test]
    fn test_archived_is_terminal() {
        let mut p = persona(PersonaRole::Conductor);
        p.transition_to(PersonaState::Archived).unwrap();
        assert!(p.transition_to(PersonaState::Active).is_err());
        assert!(p.transition_to(PersonaState::Sleeping).is_err());
    }

    #[test]
    fn test_record_completion_increments() {
        let mut p = persona(PersonaRole::SubAgent);
        p.wake().unwrap();
        p.record_completion().unwrap();
        assert_eq!(p.state, PersonaState::Sleeping);
        assert_eq!(p.experience_count, 1);
        assert!((p.consciousness_level - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_consciousness_saturates_at_ceiling() {
        let mut p = persona(PersonaRole::SubAgent);
        for _ in 0..50 {
            p.wake().unwrap();
            p.record_completion().unwrap();
        }
        assert!((p.consciousness_level - CONSCIOUSNESS_CEILING).abs() < f64::EPSILON);
        assert_eq!(p.experience_count, 50);
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            PersonaRole::Conductor,
            PersonaRole::DepartmentHead,
            PersonaRole::SubAgent,
        ] {
            assert_eq!(PersonaRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(PersonaRole::from_str("overmind"), None);
    }

    #[test]
    fn test_validation() {
        let p = Persona::new(Uuid::new_v4(), "", PersonaRole::SubAgent, "prompt");
        assert!(p.validate().is_err());

        let p = Persona::new(Uuid::new_v4(), "Aria", PersonaRole::SubAgent, "  ");
        assert!(p.validate().is_err());

        let mut p = persona(PersonaRole::SubAgent);
        p.parent_id = Some(p.id);
        assert!(p.validate().is_err());

        assert!(persona(PersonaRole::SubAgent).validate().is_ok());
    }
}
