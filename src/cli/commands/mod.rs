//! CLI command implementations.

pub mod dream;
pub mod init;
pub mod persona;
pub mod process;
pub mod status;
pub mod task;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::adapters::sqlite::initialize_database;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// Load configuration and open the project database.
pub async fn open_context() -> Result<(Config, SqlitePool)> {
    let config = ConfigLoader::load()?;
    let database_url = format!("sqlite:{}", config.database.path);
    let pool = initialize_database(&database_url)
        .await
        .context("Failed to open database")?;
    Ok((config, pool))
}
