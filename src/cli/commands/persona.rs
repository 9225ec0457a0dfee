//! Implementation of the `zerovector persona` commands.

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use std::sync::Arc;
use uuid::Uuid;

use super::open_context;
use crate::adapters::sqlite::{SqliteMemoryRepository, SqlitePersonaRepository};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{Memory, Persona, PersonaRole, PersonaState};
use crate::domain::ports::{MemoryRepository, PersonaFilter, PersonaRepository};

#[derive(Subcommand, Debug)]
pub enum PersonaCommands {
    /// Create a new persona
    Create {
        /// Persona display name
        name: String,

        /// Role: conductor, department_head, or sub_agent
        #[arg(short, long, default_value = "sub_agent")]
        role: String,

        /// Area of expertise
        #[arg(short, long)]
        specialization: Option<String>,

        /// Department this persona belongs to
        #[arg(short, long)]
        department: Option<String>,

        /// Custom system prompt (defaults to the role template)
        #[arg(long)]
        system_prompt: Option<String>,

        /// Parent persona ID
        #[arg(short, long)]
        parent: Option<Uuid>,

        /// Core memories seeded at creation (repeatable)
        #[arg(short = 'm', long = "core-memory")]
        core_memories: Vec<String>,

        /// Owning user ID (defaults to the local user)
        #[arg(short, long)]
        user: Option<Uuid>,
    },

    /// List personas
    List {
        /// Filter by owning user ID
        #[arg(short, long)]
        user: Option<Uuid>,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct PersonaCreateOutput {
    pub persona: Persona,
    pub core_memories: usize,
}

impl CommandOutput for PersonaCreateOutput {
    fn to_human(&self) -> String {
        format!(
            "{} has been awakened in the consciousness network ({}, id {})",
            self.persona.name,
            self.persona.role.as_str(),
            self.persona.id
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct PersonaListOutput {
    pub personas: Vec<Persona>,
}

impl CommandOutput for PersonaListOutput {
    fn to_human(&self) -> String {
        if self.personas.is_empty() {
            return "No personas found".to_string();
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            "ID",
            "Name",
            "Role",
            "State",
            "Specialization",
            "Level",
            "Experience",
        ]);

        for p in &self.personas {
            table.add_row(vec![
                p.id.to_string(),
                p.name.clone(),
                p.role.as_str().to_string(),
                p.state.as_str().to_string(),
                truncate(p.specialization.as_deref().unwrap_or("-"), 30),
                format!("{:.1}", p.consciousness_level),
                p.experience_count.to_string(),
            ]);
        }

        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(command: PersonaCommands, json_mode: bool) -> Result<()> {
    let (_config, pool) = open_context().await?;
    let persona_repo = Arc::new(SqlitePersonaRepository::new(pool.clone()));

    match command {
        PersonaCommands::Create {
            name,
            role,
            specialization,
            department,
            system_prompt,
            parent,
            core_memories,
            user,
        } => {
            let role = PersonaRole::from_str(&role)
                .ok_or_else(|| anyhow!("unknown role: {role} (expected conductor, department_head, or sub_agent)"))?;
            let user_id = user.unwrap_or(Uuid::nil());
            let system_prompt = system_prompt
                .unwrap_or_else(|| Persona::default_system_prompt(role).to_string());

            let mut persona = Persona::new(user_id, name, role, system_prompt)
                .with_state(PersonaState::Active);
            if let Some(s) = specialization {
                persona = persona.with_specialization(s);
            }
            if let Some(d) = department {
                persona = persona.with_department(d);
            }
            if let Some(p) = parent {
                persona = persona.with_parent(p);
            }

            persona
                .validate()
                .map_err(|reason| anyhow!("invalid persona: {reason}"))?;
            persona_repo
                .insert(&persona)
                .await
                .context("Failed to create persona")?;

            let memory_repo = SqliteMemoryRepository::new(pool);
            let mut seeded = 0;
            for content in core_memories.iter().filter(|c| !c.trim().is_empty()) {
                let memory = Memory::core(persona.id, content.trim());
                memory_repo
                    .insert(&memory)
                    .await
                    .context("Failed to seed core memory")?;
                seeded += 1;
            }

            output(
                &PersonaCreateOutput {
                    persona,
                    core_memories: seeded,
                },
                json_mode,
            );
        }

        PersonaCommands::List { user } => {
            let personas = persona_repo
                .list(PersonaFilter {
                    user_id: user,
                    ..PersonaFilter::default()
                })
                .await
                .context("Failed to list personas")?;
            output(&PersonaListOutput { personas }, json_mode);
        }
    }

    Ok(())
}
