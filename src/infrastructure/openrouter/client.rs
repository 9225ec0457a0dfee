//! HTTP adapter implementing the CompletionClient port against the
//! OpenRouter chat-completions API.
//!
//! One outbound request per completion; no retry and no streaming. Retry
//! policy belongs to callers, and the orchestrator chooses not to retry at
//! all (a failed completion fails the task and the batch moves on).

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::domain::models::OpenRouterConfig;
use crate::domain::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// HTTP client for the OpenRouter chat-completions endpoint.
pub struct OpenRouterClient {
    http_client: HttpClient,
    api_key: Option<String>,
    base_url: String,
    referer: String,
    app_title: String,
}

impl OpenRouterClient {
    /// Create a client from configuration, reading the credential from the
    /// environment. A missing credential is not an error here; it surfaces
    /// as `CompletionError::MissingCredential` on the first call, failing
    /// only the task being processed.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, CompletionError> {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!("{API_KEY_ENV} is not set; completions will fail until configured");
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
        })
    }

    /// Create a client with an explicit credential (tests, embedding).
    pub fn with_api_key(config: &OpenRouterConfig, api_key: impl Into<String>) -> Result<Self, CompletionError> {
        let mut client = Self::new(config)?;
        client.api_key = Some(api_key.into());
        Ok(client)
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CompletionError::MissingCredential);
        };

        let body = ChatRequest {
            model: request.model,
            messages: vec![ChatMessage::user(request.prompt)],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!("sending completion request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            warn!(%status, "provider rejected completion request");
            return Err(CompletionError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        payload
            .into_completion_text()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                CompletionError::MalformedResponse("response carried no completion text".to_string())
            })
    }
}
