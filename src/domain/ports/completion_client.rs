//! Completion client port.
//!
//! The single capability the core needs from a language-model provider:
//! given a prompt and a model identifier, return a completion string.
//! Adapters live in the infrastructure layer; tests inject stubs.
//!
//! Retry policy deliberately lives outside this port. Callers decide
//! whether a failed completion is retried (the task orchestrator does not
//! retry; failed tasks are simply marked failed and the batch moves on).

use async_trait::async_trait;
use thiserror::Error;

/// A single completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Full prompt text
    pub prompt: String,
    /// Provider model identifier (e.g. "anthropic/claude-3.5-sonnet")
    pub model: String,
    /// Sampling temperature; task execution uses a lower value than
    /// dream synthesis
    pub temperature: f64,
    /// Bound on generated output length
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Set sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max output tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Errors from the completion provider.
///
/// `MissingCredential` is a configuration failure; everything else is a
/// provider/transport failure. Both fail only the task being processed.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API credential configured in the environment
    #[error("no completion API credential configured")]
    MissingCredential,

    /// Provider returned a non-success HTTP status
    #[error("provider rejected the request ({status}): {body}")]
    Provider { status: u16, body: String },

    /// Provider returned a payload the client could not interpret
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("network error: {0}")]
    Network(String),
}

impl CompletionError {
    /// Whether this failure is a local configuration problem rather than a
    /// provider rejection.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

/// Port trait for language-model completion.
///
/// Implementations must be `Send + Sync`; the orchestrator holds one behind
/// an `Arc<dyn CompletionClient>`. One outbound call per invocation; no
/// retries, no streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Produce a completion for the request, or fail with a classified error.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
