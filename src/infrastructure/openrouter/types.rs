//! Wire types for the OpenRouter chat-completions API.

use serde::{Deserialize, Serialize};

/// Request body for a chat completion.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. "anthropic/claude-3.5-sonnet")
    pub model: String,
    /// Conversation messages; the core always sends a single user message
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Output token bound
    pub max_tokens: u32,
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user", "assistant", or "system"
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response body for a chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion candidates; the first is used
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message
    pub message: ChoiceMessage,
}

/// Generated message payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text; absent on malformed payloads
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Extract the completion text, if the payload carries one.
    pub fn into_completion_text(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "anthropic/claude-3.5-sonnet".to_string(),
            messages: vec![ChatMessage::user("hello")],
            temperature: 0.7,
            max_tokens: 2000,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "anthropic/claude-3.5-sonnet");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"done"}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_completion_text().as_deref(), Some("done"));
    }

    #[test]
    fn test_response_without_choices_yields_none() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_completion_text().is_none());
    }

    #[test]
    fn test_response_with_null_content_yields_none() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_completion_text().is_none());
    }
}
