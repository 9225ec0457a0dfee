//! Command-line interface for the ZeroVector persona network.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

pub use output::{output, truncate, CommandOutput};

#[derive(Parser)]
#[command(name = "zerovector")]
#[command(about = "ZeroVector - persona task routing and consciousness network", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize ZeroVector configuration and database
    Init(commands::init::InitArgs),

    /// Persona management commands
    #[command(subcommand)]
    Persona(commands::persona::PersonaCommands),

    /// Task management commands
    #[command(subcommand)]
    Task(commands::task::TaskCommands),

    /// Process the backlog of due tasks, then run the dream cycle
    Process(commands::process::ProcessArgs),

    /// Run a dream cycle sweep over idle personas
    Dream(commands::dream::DreamArgs),

    /// Show task backlog and persona counts
    Status(commands::status::StatusArgs),
}

/// Report a command failure and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
