//! ZeroVector CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zerovector::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => zerovector::cli::commands::init::execute(args, cli.json).await,
        Commands::Persona(command) => {
            zerovector::cli::commands::persona::execute(command, cli.json).await
        }
        Commands::Task(command) => zerovector::cli::commands::task::execute(command, cli.json).await,
        Commands::Process(args) => {
            zerovector::cli::commands::process::execute(args, cli.json).await
        }
        Commands::Dream(args) => zerovector::cli::commands::dream::execute(args, cli.json).await,
        Commands::Status(args) => zerovector::cli::commands::status::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        zerovector::cli::handle_error(&err, cli.json);
    }
}
