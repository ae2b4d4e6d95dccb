//! Configuration for text-generation clients

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// OpenAI chat completions endpoint root
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Groq's OpenAI-compatible endpoint root
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Gemini REST endpoint root
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for one hosted backend
#[derive(Clone, Deserialize)]
pub struct ProviderClientConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Model to request
    pub model: String,

    /// API key
    pub api_key: SecretString,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sampling temperature; `None` leaves the backend default
    #[serde(default)]
    pub temperature: Option<f32>,
}

const fn default_timeout_ms() -> u64 {
    60_000
}

/// Temperature used for chat-completion providers
pub const CHAT_TEMPERATURE: f32 = 0.4;

impl std::fmt::Debug for ProviderClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClientConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .field("timeout_ms", &self.timeout_ms)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ProviderClientConfig {
    /// Create a config for an arbitrary endpoint
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            timeout_ms: default_timeout_ms(),
            temperature: None,
        }
    }

    /// OpenAI with the chat temperature
    pub fn openai(model: impl Into<String>, api_key: SecretString) -> Self {
        Self::new(OPENAI_BASE_URL, model, api_key).with_temperature(Some(CHAT_TEMPERATURE))
    }

    /// Groq with the chat temperature
    pub fn groq(model: impl Into<String>, api_key: SecretString) -> Self {
        Self::new(GROQ_BASE_URL, model, api_key).with_temperature(Some(CHAT_TEMPERATURE))
    }

    /// Gemini with the backend's default temperature
    pub fn gemini(model: impl Into<String>, api_key: SecretString) -> Self {
        Self::new(GEMINI_BASE_URL, model, api_key)
    }

    /// Point at a different API root (tests, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }
}
