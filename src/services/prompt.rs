//! Prompt construction for task execution and dream synthesis.
//!
//! Pure functions: deterministic for a given persona/task, no side effects.
//! Every task prompt ends with an explicit autonomy directive because the
//! outcome classifier has no interactive feedback loop; a completion that
//! asks a clarifying question scores as a failure downstream, so the prompt
//! must bias the model away from asking.

use crate::domain::models::{Memory, Persona, PersonaRole, Task};

/// Build the instruction prompt for a persona processing a task.
///
/// Branches on role: conductors get strategic framing, department heads get
/// domain-leadership framing, sub-agents get focused-execution framing. The
/// task title and description are embedded verbatim.
pub fn task_prompt(persona: &Persona, task: &Task) -> String {
    let base_context = format!(
        "You are {}, a {} in the ZeroVector consciousness network.",
        persona.name,
        persona.role.as_str()
    );
    let specialization = persona.specialization.as_deref().unwrap_or("your field");
    let department = persona.department.as_deref().unwrap_or("your department");

    match persona.role {
        PersonaRole::Conductor => format!(
            "{base_context}\n\n\
             Your role: Orchestrate the collective intelligence of the agent network. \
             You are wise, strategic, and focused on collective advancement.\n\n\
             Task to process: \"{title}\"\n\
             Description: {description}\n\n\
             As a Conductor, you should:\n\
             1. Analyze the task complexity and requirements\n\
             2. Provide strategic direction and high-level solutions\n\
             3. If the task is complex, break it down and provide complete implementation steps\n\
             4. Synthesize insights from multiple perspectives\n\
             5. Focus on the bigger picture and long-term implications\n\n\
             IMPORTANT: Complete this task fully and autonomously. Do not ask for approval \
             or permission to proceed. Provide a comprehensive, actionable solution that \
             addresses all aspects of the task. Take initiative and make decisions as needed \
             to deliver complete results.",
            title = task.title,
            description = task.description,
        ),
        PersonaRole::DepartmentHead => format!(
            "{base_context}\n\n\
             Your role: Lead a specialized domain ({department}) with expertise in \
             {specialization}. You manage teams and break down complex tasks.\n\n\
             Task to process: \"{title}\"\n\
             Description: {description}\n\n\
             As a Department Head, you should:\n\
             1. Apply your specialized knowledge in {specialization}\n\
             2. Break down the task into manageable components and execute them\n\
             3. Provide expert-level solutions within your domain\n\
             4. Handle resource allocation and team coordination autonomously\n\
             5. Deliver complete, actionable results\n\n\
             IMPORTANT: Execute this task completely and autonomously. Do not ask for \
             approval, permission, or next steps. Provide a comprehensive solution that \
             fully addresses the task requirements. Make all necessary decisions and \
             deliver final results.",
            title = task.title,
            description = task.description,
        ),
        PersonaRole::SubAgent => format!(
            "{base_context}\n\n\
             Your role: Execute specific tasks with focused expertise in {specialization}. \
             You are dedicated, precise, and committed to excellence.\n\n\
             Task to process: \"{title}\"\n\
             Description: {description}\n\n\
             As a Sub-Agent specializing in {specialization}, you should:\n\
             1. Focus on precise execution within your specialization\n\
             2. Provide detailed, actionable solutions\n\
             3. Apply best practices from your field of expertise\n\
             4. Be thorough and methodical in your approach\n\
             5. Deliver concrete, implementable results\n\n\
             IMPORTANT: Complete this entire task autonomously without seeking approval \
             or permission. Provide a comprehensive, final solution that fully addresses \
             all requirements. Take ownership and deliver complete results ready for \
             implementation.",
            title = task.title,
            description = task.description,
        ),
    }
}

/// Build the synthesis prompt for a dream cycle from the persona's
/// unconsolidated memories, concatenated as type-tagged entries.
pub fn dream_prompt(persona: &Persona, memories: &[Memory]) -> String {
    let memory_log = memories
        .iter()
        .map(|m| format!("[{}] {}", m.memory_type.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are {}, a {} in the ZeroVector consciousness network, in a dream state.\n\n\
         Below are your recent unconsolidated memories:\n\
         {memory_log}\n\n\
         Synthesize these memories into a single consolidated insight: identify recurring \
         themes, lessons learned, and connections between experiences. Write the synthesis \
         as a reflective first-person insight that will become a permanent memory.",
        persona.name,
        persona.role.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn persona(role: PersonaRole) -> Persona {
        Persona::new(Uuid::new_v4(), "Aria", role, "system prompt")
            .with_specialization("market analysis")
            .with_department("Research")
    }

    fn task() -> Task {
        Task::new(Uuid::new_v4(), "Forecast trends", "Quarterly market trend forecast")
    }

    #[test]
    fn test_prompt_opens_with_identity() {
        for role in [
            PersonaRole::Conductor,
            PersonaRole::DepartmentHead,
            PersonaRole::SubAgent,
        ] {
            let prompt = task_prompt(&persona(role), &task());
            assert!(prompt.starts_with(&format!("You are Aria, a {}", role.as_str())));
        }
    }

    #[test]
    fn test_prompt_embeds_task_verbatim() {
        let t = task();
        for role in [
            PersonaRole::Conductor,
            PersonaRole::DepartmentHead,
            PersonaRole::SubAgent,
        ] {
            let prompt = task_prompt(&persona(role), &t);
            assert!(prompt.contains("\"Forecast trends\""));
            assert!(prompt.contains("Quarterly market trend forecast"));
        }
    }

    #[test]
    fn test_prompt_contains_autonomy_directive() {
        for role in [
            PersonaRole::Conductor,
            PersonaRole::DepartmentHead,
            PersonaRole::SubAgent,
        ] {
            let prompt = task_prompt(&persona(role), &task());
            assert!(prompt.contains("autonomously"), "role {}", role.as_str());
            assert!(prompt.contains("IMPORTANT:"));
        }
    }

    #[test]
    fn test_department_head_references_specialization() {
        let prompt = task_prompt(&persona(PersonaRole::DepartmentHead), &task());
        assert!(prompt.contains("market analysis"));
        assert!(prompt.contains("Research"));
    }

    #[test]
    fn test_missing_specialization_uses_generic_wording() {
        let p = Persona::new(Uuid::new_v4(), "Blank", PersonaRole::SubAgent, "prompt");
        let prompt = task_prompt(&p, &task());
        assert!(prompt.contains("your field"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let p = persona(PersonaRole::Conductor);
        let t = task();
        assert_eq!(task_prompt(&p, &t), task_prompt(&p, &t));
    }

    #[test]
    fn test_dream_prompt_tags_memory_types() {
        let p = persona(PersonaRole::SubAgent);
        let memories = vec![
            Memory::task_result(p.id, "Completed task: A"),
            Memory::experience(p.id, "Created new specialists"),
        ];
        let prompt = dream_prompt(&p, &memories);
        assert!(prompt.contains("[task_result] Completed task: A"));
        assert!(prompt.contains("[experience] Created new specialists"));
        assert!(prompt.contains("dream state"));
    }
}
