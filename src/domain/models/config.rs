use serde::{Deserialize, Serialize};

/// Main configuration structure for ZeroVector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Completion provider configuration
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Task processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Dream cycle configuration
    #[serde(default)]
    pub dream: DreamConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".zerovector/zerovector.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Completion provider (OpenRouter) configuration.
///
/// The API key is never stored in config files; it is read from the
/// `OPENROUTER_API_KEY` environment variable at client construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OpenRouterConfig {
    /// Base URL of the OpenRouter-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier for completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Referer header sent for provider-side attribution
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Application title header
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "anthropic/claude-3.5-sonnet".to_string()
}

fn default_referer() -> String {
    "https://zerovector-consciousness.lovableproject.com".to_string()
}

fn default_app_title() -> String {
    "ZeroVector Consciousness Network".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            referer: default_referer(),
            app_title: default_app_title(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Task processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessingConfig {
    /// Maximum tasks processed per batch invocation
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Sampling temperature for task execution
    #[serde(default = "default_task_temperature")]
    pub temperature: f64,

    /// Maximum tokens requested per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

const fn default_batch_size() -> u32 {
    25
}

const fn default_task_temperature() -> f64 {
    0.7
}

const fn default_max_tokens() -> u32 {
    2000
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            temperature: default_task_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Dream cycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DreamConfig {
    /// Minutes a persona must be idle before it can dream
    #[serde(default = "default_idle_minutes")]
    pub idle_threshold_minutes: i64,

    /// Sampling temperature for dream synthesis (higher than task
    /// execution to bias creativity)
    #[serde(default = "default_dream_temperature")]
    pub temperature: f64,

    /// Maximum tokens requested per synthesis
    #[serde(default = "default_dream_max_tokens")]
    pub max_tokens: u32,

    /// Consciousness growth applied per completed dream cycle
    #[serde(default = "default_consciousness_growth")]
    pub consciousness_growth: f64,
}

const fn default_idle_minutes() -> i64 {
    30
}

const fn default_dream_temperature() -> f64 {
    0.9
}

const fn default_dream_max_tokens() -> u32 {
    1000
}

const fn default_consciousness_growth() -> f64 {
    0.5
}

impl Default for DreamConfig {
    fn default() -> Self {
        Self {
            idle_threshold_minutes: default_idle_minutes(),
            temperature: default_dream_temperature(),
            max_tokens: default_dream_max_tokens(),
            consciousness_growth: default_consciousness_growth(),
        }
    }
}
