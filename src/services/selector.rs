//! Persona selection for task routing.
//!
//! Deterministic priority routing: the most specific expertise match wins
//! before escalating to generalists, and conductors are reserved for tasks
//! that signal genuine cross-cutting complexity so a single orchestrator
//! persona does not bottleneck all traffic.

use crate::domain::models::{Persona, PersonaRole, Task};

/// Task text longer than this is considered complex enough for a conductor.
const COMPLEX_TASK_LEN: usize = 200;

/// Keywords that signal cross-cutting complexity.
const COMPLEXITY_KEYWORDS: &[&str] = &[
    "complex",
    "coordinate",
    "multiple",
    "strategy",
    "analyze",
    "comprehensive",
];

/// Tokens of a specialization shorter than this are too generic to match on.
const MIN_MATCH_TOKEN_LEN: usize = 3;

/// Select the best persona for a task from pre-filtered candidates.
///
/// Callers must pass only selectable personas (active or sleeping);
/// archived and dreaming personas are never candidates. Priority order,
/// first match wins:
///
/// 1. A sub-agent whose specialization or department matches the task text.
/// 2. A department head with the same kind of match.
/// 3. A conductor, when the task looks complex (length or keywords).
/// 4. Fallback: first department head, else first sub-agent, else first
///    conductor, else the first candidate in input order.
pub fn select_persona<'a>(candidates: &'a [Persona], task: &Task) -> Option<&'a Persona> {
    if candidates.is_empty() {
        return None;
    }

    let task_text = task.routing_text().to_lowercase();

    let conductors: Vec<&Persona> = by_role(candidates, PersonaRole::Conductor);
    let department_heads: Vec<&Persona> = by_role(candidates, PersonaRole::DepartmentHead);
    let sub_agents: Vec<&Persona> = by_role(candidates, PersonaRole::SubAgent);

    if let Some(specialist) = sub_agents
        .iter()
        .copied()
        .find(|p| matches_task(p, &task_text))
    {
        return Some(specialist);
    }

    if let Some(head) = department_heads
        .iter()
        .copied()
        .find(|p| matches_task(p, &task_text))
    {
        return Some(head);
    }

    if is_complex(&task_text) {
        if let Some(conductor) = conductors.first().copied() {
            return Some(conductor);
        }
    }

    department_heads
        .first()
        .or_else(|| sub_agents.first())
        .or_else(|| conductors.first())
        .copied()
        .or_else(|| candidates.first())
}

fn by_role(candidates: &[Persona], role: PersonaRole) -> Vec<&Persona> {
    candidates.iter().filter(|p| p.role == role).collect()
}

/// Whether a persona's specialization or department matches the task text:
/// either field as a case-insensitive substring, or any sufficiently long
/// specialization token present in the text.
fn matches_task(persona: &Persona, task_text: &str) -> bool {
    let specialization = persona
        .specialization
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    let department = persona.department.as_deref().unwrap_or("").to_lowercase();

    if specialization.is_empty() {
        return false;
    }

    task_text.contains(&specialization)
        || (!department.is_empty() && task_text.contains(&department))
        || specialization
            .split_whitespace()
            .any(|word| word.len() > MIN_MATCH_TOKEN_LEN && task_text.contains(word))
}

/// Whether task text signals enough complexity to escalate to a conductor.
fn is_complex(task_text: &str) -> bool {
    task_text.len() > COMPLEX_TASK_LEN
        || COMPLEXITY_KEYWORDS.iter().any(|kw| task_text.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn persona(name: &str, role: PersonaRole, specialization: Option<&str>) -> Persona {
        let mut p = Persona::new(Uuid::new_v4(), name, role, "prompt");
        if let Some(s) = specialization {
            p = p.with_specialization(s);
        }
        p
    }

    fn task(title: &str, description: &str) -> Task {
        Task::new(Uuid::new_v4(), title, description)
    }

    #[test]
    fn test_empty_candidates_selects_none() {
        let t = task("Anything", "at all");
        assert!(select_persona(&[], &t).is_none());
    }

    #[test]
    fn test_sub_agent_specialization_beats_department_head() {
        let candidates = vec![
            persona("Head", PersonaRole::DepartmentHead, Some("Data Analysis")),
            persona("Agent", PersonaRole::SubAgent, Some("Data Analysis")),
        ];
        let t = task("Run data analysis", "over the quarterly numbers");
        let selected = select_persona(&candidates, &t).unwrap();
        assert_eq!(selected.name, "Agent");
        assert_eq!(selected.role, PersonaRole::SubAgent);
    }

    #[test]
    fn test_department_head_matches_before_conductor() {
        let candidates = vec![
            persona("Prime", PersonaRole::Conductor, None),
            persona("Head", PersonaRole::DepartmentHead, Some("security auditing")),
        ];
        let t = task("Security auditing pass", "over the login flow");
        assert_eq!(select_persona(&candidates, &t).unwrap().name, "Head");
    }

    #[test]
    fn test_specialization_token_match() {
        // "forecasting" appears as a token of the specialization in the text
        let candidates = vec![persona(
            "Aria",
            PersonaRole::SubAgent,
            Some("market trend forecasting"),
        )];
        let t = task("Need forecasting help", "for the next release window");
        assert_eq!(select_persona(&candidates, &t).unwrap().name, "Aria");
    }

    #[test]
    fn test_short_tokens_do_not_match() {
        // Every token of "ad ops" is too short to count as a keyword match
        let candidates = vec![
            persona("Niche", PersonaRole::SubAgent, Some("ad ops")),
            persona("Head", PersonaRole::DepartmentHead, None),
        ];
        let t = task("Write ops documentation", "for the on-call rotation");
        // Falls through to the department head fallback
        assert_eq!(select_persona(&candidates, &t).unwrap().name, "Head");
    }

    #[test]
    fn test_complex_task_escalates_to_conductor() {
        let candidates = vec![
            persona("Prime", PersonaRole::Conductor, None),
            persona("Head", PersonaRole::DepartmentHead, Some("databases")),
        ];
        let description = format!("{} comprehensive", "x".repeat(210));
        let t = task("Plan the quarter", &description);
        let selected = select_persona(&candidates, &t).unwrap();
        assert_eq!(selected.role, PersonaRole::Conductor);
    }

    #[test]
    fn test_complexity_keyword_alone_escalates() {
        let candidates = vec![
            persona("Prime", PersonaRole::Conductor, None),
            persona("Head", PersonaRole::DepartmentHead, Some("databases")),
        ];
        let t = task("Coordinate the teams", "short but crosses departments");
        assert_eq!(select_persona(&candidates, &t).unwrap().role, PersonaRole::Conductor);
    }

    #[test]
    fn test_simple_task_prefers_department_head_fallback() {
        let candidates = vec![
            persona("Prime", PersonaRole::Conductor, None),
            persona("Head", PersonaRole::DepartmentHead, Some("databases")),
        ];
        let t = task("Tidy the docs", "small fixes");
        assert_eq!(select_persona(&candidates, &t).unwrap().name, "Head");
    }

    #[test]
    fn test_fallback_order_without_heads() {
        let candidates = vec![
            persona("Prime", PersonaRole::Conductor, None),
            persona("Agent", PersonaRole::SubAgent, None),
        ];
        let t = task("Tidy the docs", "small fixes");
        // No department heads: sub-agent outranks conductor in the fallback
        assert_eq!(select_persona(&candidates, &t).unwrap().name, "Agent");
    }

    #[test]
    fn test_conductor_only_pool_still_selects() {
        let candidates = vec![persona("Prime", PersonaRole::Conductor, None)];
        let t = task("Tidy the docs", "small fixes");
        assert_eq!(select_persona(&candidates, &t).unwrap().name, "Prime");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let candidates = vec![
            persona("Head", PersonaRole::DepartmentHead, Some("Data Analysis")),
            persona("Agent", PersonaRole::SubAgent, Some("Data Analysis")),
            persona("Prime", PersonaRole::Conductor, None),
        ];
        let t = task("Run data analysis", "over the quarterly numbers");
        let first = select_persona(&candidates, &t).unwrap().id;
        for _ in 0..10 {
            assert_eq!(select_persona(&candidates, &t).unwrap().id, first);
        }
    }
}
