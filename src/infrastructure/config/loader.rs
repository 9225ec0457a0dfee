use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(u32),

    #[error("Invalid temperature: {0}. Must be within [0.0, 2.0]")]
    InvalidTemperature(f64),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid idle_threshold_minutes: {0}. Must be positive")]
    InvalidIdleThreshold(i64),

    #[error("Base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Model cannot be empty")]
    EmptyModel,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. .zerovector/config.yaml (project config, created by init)
    /// 3. Environment variables (ZEROVECTOR_* prefix)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".zerovector/config.yaml"))
            .merge(Env::prefixed("ZEROVECTOR_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.openrouter.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.openrouter.model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.processing.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(config.processing.batch_size));
        }
        if config.processing.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.processing.max_tokens));
        }
        if !(0.0..=2.0).contains(&config.processing.temperature) {
            return Err(ConfigError::InvalidTemperature(config.processing.temperature));
        }

        if config.dream.idle_threshold_minutes <= 0 {
            return Err(ConfigError::InvalidIdleThreshold(
                config.dream.idle_threshold_minutes,
            ));
        }
        if config.dream.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.dream.max_tokens));
        }
        if !(0.0..=2.0).contains(&config.dream.temperature) {
            return Err(ConfigError::InvalidTemperature(config.dream.temperature));
        }

        Ok(())
    }
}
