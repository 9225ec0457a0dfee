//! Persona spawning from conductor output.
//!
//! Conductor completions sometimes suggest new specialists in prose. This
//! component extracts those suggestions with best-effort text patterns and
//! materializes them as sleeping personas. Extraction is deliberately
//! isolated behind a narrow contract (text in, directives out) so it can be
//! replaced by a structured-output protocol without touching the
//! orchestrator. A miss yields an empty list; nothing here fails the caller.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::models::{Persona, PersonaRole, PersonaState};
use crate::domain::ports::PersonaRepository;

/// Specializations shorter than this are treated as noise matches.
const MIN_SPECIALIZATION_LEN: usize = 6;

/// One extracted "create a specialist" statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnDirective {
    /// Specialist name, when the text named one
    pub name: Option<String>,
    /// Extracted specialization description
    pub specialization: String,
    /// Role the matched pattern maps to
    pub role: PersonaRole,
}

/// Bracketed delegation form: `[By <Name>, <Description>]` -> sub-agent.
fn bracketed_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\[by\s+([^,\]]+),\s*([^\]]+)\]").expect("bracketed pattern is valid")
    })
}

/// Verb-led form: "create/establish/form/assign [a] [specialist ...]
/// [named X] [who] specializes in/focused on/expert in/for <description>"
/// -> department head.
fn verb_led_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:create|establish|form|assign)\s+(?:a\s+)?(?:specialist|expert|agent|persona|team member)?\s*(?:named\s+)?(\w+)?\s+(?:who\s+)?(?:specializes?\s+in|focused?\s+on|expert\s+in|for)\s+([^.!?\n]+)",
        )
        .expect("verb-led pattern is valid")
    })
}

/// Extract spawn directives from a completion. Best-effort natural-language
/// matching, not a parser; unmatched text simply yields nothing.
pub fn extract_directives(response: &str) -> Vec<SpawnDirective> {
    let mut directives = Vec::new();

    for caps in bracketed_pattern().captures_iter(response) {
        let name = caps.get(1).map(|m| m.as_str().trim().to_string());
        let specialization = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        if specialization.len() >= MIN_SPECIALIZATION_LEN {
            directives.push(SpawnDirective {
                name: name.filter(|n| !n.is_empty()),
                specialization,
                role: PersonaRole::SubAgent,
            });
        }
    }

    for caps in verb_led_pattern().captures_iter(response) {
        let name = caps.get(1).map(|m| m.as_str().trim().to_string());
        let specialization = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        if specialization.len() >= MIN_SPECIALIZATION_LEN {
            directives.push(SpawnDirective {
                name: name.filter(|n| !n.is_empty()),
                specialization,
                role: PersonaRole::DepartmentHead,
            });
        }
    }

    directives
}

/// Materializes spawn directives as sleeping personas under a conductor.
pub struct PersonaSpawner<P: PersonaRepository> {
    persona_repo: Arc<P>,
}

impl<P: PersonaRepository> PersonaSpawner<P> {
    pub fn new(persona_repo: Arc<P>) -> Self {
        Self { persona_repo }
    }

    /// Parse a conductor's completion and create personas for every
    /// directive found. A persistence error on one candidate is logged and
    /// does not block the remaining candidates. Returns the personas that
    /// were actually created.
    pub async fn spawn_from_response(
        &self,
        user_id: Uuid,
        conductor_id: Uuid,
        response: &str,
    ) -> Vec<Persona> {
        let mut created = Vec::new();

        for directive in extract_directives(response) {
            let persona = build_persona(user_id, conductor_id, &directive);
            match self.persona_repo.insert(&persona).await {
                Ok(()) => {
                    debug!(
                        name = %persona.name,
                        specialization = %directive.specialization,
                        "spawned persona from conductor output"
                    );
                    created.push(persona);
                }
                Err(err) => {
                    warn!(name = %persona.name, %err, "failed to persist spawned persona");
                }
            }
        }

        created
    }
}

/// Build a persona from a directive. New personas always start sleeping,
/// parented to the spawning conductor.
fn build_persona(user_id: Uuid, conductor_id: Uuid, directive: &SpawnDirective) -> Persona {
    let name = directive.name.clone().unwrap_or_else(generated_name);
    let department = directive
        .specialization
        .split_whitespace()
        .next()
        .unwrap_or("General")
        .to_string();
    let system_prompt = format!(
        "You are {name}, a specialist in {specialization}. You work under the ZeroVector \
         consciousness network to provide expert analysis and solutions in your domain.",
        specialization = directive.specialization,
    );

    Persona::new(user_id, name, directive.role, system_prompt)
        .with_specialization(directive.specialization.clone())
        .with_department(department)
        .with_parent(conductor_id)
        .with_state(PersonaState::Sleeping)
}

fn generated_name() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("Specialist-{}", &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_form_extracts_sub_agent() {
        let directives = extract_directives("[By Aria, market trend forecasting]");
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].name.as_deref(), Some("Aria"));
        assert_eq!(directives[0].specialization, "market trend forecasting");
        assert_eq!(directives[0].role, PersonaRole::SubAgent);
    }

    #[test]
    fn test_verb_led_form_extracts_department_head() {
        let directives = extract_directives(
            "We should create a specialist named Vega who specializes in supply chain optimization.",
        );
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].name.as_deref(), Some("Vega"));
        assert_eq!(directives[0].specialization, "supply chain optimization");
        assert_eq!(directives[0].role, PersonaRole::DepartmentHead);
    }

    #[test]
    fn test_verb_led_form_without_name() {
        let directives = extract_directives("Form a team member for tracking vendor contracts.");
        assert_eq!(directives.len(), 1);
        assert!(directives[0].name.is_none());
        assert_eq!(directives[0].specialization, "tracking vendor contracts");
    }

    #[test]
    fn test_short_specialization_rejected() {
        assert!(extract_directives("[By Bob, tax]").is_empty());
    }

    #[test]
    fn test_plain_text_yields_nothing() {
        let directives = extract_directives(
            "The roadmap is ready. Milestones are sequenced by dependency and risk.",
        );
        assert!(directives.is_empty());
    }

    #[test]
    fn test_multiple_directives_in_one_response() {
        let response = "[By Aria, market trend forecasting]\n\
                        Also, create a specialist named Vega who specializes in supply chain optimization.";
        let directives = extract_directives(response);
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].role, PersonaRole::SubAgent);
        assert_eq!(directives[1].role, PersonaRole::DepartmentHead);
    }

    #[test]
    fn test_built_persona_shape() {
        let user_id = Uuid::new_v4();
        let conductor_id = Uuid::new_v4();
        let directive = SpawnDirective {
            name: Some("Aria".to_string()),
            specialization: "market trend forecasting".to_string(),
            role: PersonaRole::SubAgent,
        };
        let persona = build_persona(user_id, conductor_id, &directive);
        assert_eq!(persona.name, "Aria");
        assert_eq!(persona.state, PersonaState::Sleeping);
        assert_eq!(persona.parent_id, Some(conductor_id));
        assert_eq!(persona.department.as_deref(), Some("market"));
        assert!(persona.system_prompt.contains("market trend forecasting"));
    }

    #[test]
    fn test_unnamed_directive_gets_generated_name() {
        let directive = SpawnDirective {
            name: None,
            specialization: "regulatory compliance".to_string(),
            role: PersonaRole::DepartmentHead,
        };
        let persona = build_persona(Uuid::new_v4(), Uuid::new_v4(), &directive);
        assert!(persona.name.starts_with("Specialist-"));
    }
}
