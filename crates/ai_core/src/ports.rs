//! The seam between the relay and the chat-completion backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// A prompt ready to send to one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub messages: Vec<InferenceMessage>,
    /// Left out of the wire body when unset, so the backend default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// One turn, using the chat-completions role names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceMessage {
    pub role: String,
    pub content: String,
}

impl InferenceMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl InferenceRequest {
    /// A lone user turn.
    pub fn simple(user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![InferenceMessage::user(user_message)],
            temperature: None,
        }
    }

    /// Personality first, then the user's text.
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![InferenceMessage::system(system), InferenceMessage::user(user)],
            temperature: None,
        }
    }
}

/// What a backend produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated content, trimmed; empty when the backend produced nothing usable
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
    /// Backend's stop reason, verbatim.
    pub finish_reason: Option<String>,
}

/// Token counts as reported by the backend, for debug logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for text-generation backends
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError>;

    fn model(&self) -> &str;
}
