//! Text provider adapter - Implements `TextProvider` using the ai_core clients
//!
//! The backend client is built on first use and cached for the life of the
//! adapter. Without an API key the adapter still exists and fails each call
//! with a missing-credential error, so the fallback order stays intact.

use std::sync::Arc;

use ai_core::{
    GeminiEngine, InferenceEngine, InferenceError, InferenceRequest, OpenAiCompatibleEngine,
    ProviderClientConfig,
};
use application::ports::TextProvider;
use application::{AdapterError, AdapterErrorKind};
use async_trait::async_trait;
use domain::{Prompt, ProviderId};
use secrecy::SecretString;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

/// Adapter for one text-generation backend
pub struct ProviderAdapter {
    id: ProviderId,
    client_config: Option<ProviderClientConfig>,
    engine: OnceCell<Arc<dyn InferenceEngine>>,
}

impl std::fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("id", &self.id)
            .field("client_config", &self.client_config)
            .field("initialized", &self.engine.initialized())
            .finish()
    }
}

impl ProviderAdapter {
    /// Create an adapter; `api_key` of `None` leaves it unconfigured
    pub fn new(id: ProviderId, model: impl Into<String>, api_key: Option<SecretString>) -> Self {
        let model = model.into();
        let client_config = api_key.map(|key| match id {
            ProviderId::Groq => ProviderClientConfig::groq(model, key),
            ProviderId::Gemini => ProviderClientConfig::gemini(model, key),
            ProviderId::OpenAi => ProviderClientConfig::openai(model, key),
        });

        Self {
            id,
            client_config: client_config.filter(ProviderClientConfig::has_api_key),
            engine: OnceCell::new(),
        }
    }

    /// Point the client at a different API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client_config = self.client_config.map(|c| c.with_base_url(base_url));
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.client_config = self.client_config.map(|c| c.with_timeout_ms(timeout_ms));
        self
    }

    /// Whether an API key is present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client_config.is_some()
    }

    async fn engine(&self) -> Result<&Arc<dyn InferenceEngine>, AdapterError> {
        let config = self
            .client_config
            .as_ref()
            .ok_or_else(|| AdapterError::missing_credential(self.id))?;

        self.engine
            .get_or_try_init(|| async {
                debug!(provider = %self.id, model = %config.model, "Creating provider client");
                let engine: Arc<dyn InferenceEngine> = match self.id {
                    ProviderId::Gemini => Arc::new(GeminiEngine::new(config.clone())?),
                    ProviderId::Groq | ProviderId::OpenAi => {
                        Arc::new(OpenAiCompatibleEngine::new(config.clone())?)
                    },
                };
                Ok::<_, InferenceError>(engine)
            })
            .await
            .map_err(|e| map_inference_error(self.id, &e))
    }

    fn build_request(&self, prompt: &Prompt) -> InferenceRequest {
        match self.id {
            // Gemini gets one flattened turn
            ProviderId::Gemini => InferenceRequest::simple(prompt.as_single_turn()),
            ProviderId::Groq | ProviderId::OpenAi => {
                InferenceRequest::with_system(prompt.system(), prompt.user())
            },
        }
    }
}

#[async_trait]
impl TextProvider for ProviderAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    #[instrument(skip(self, prompt), fields(provider = %self.id))]
    async fn ask(&self, prompt: &Prompt) -> Result<String, AdapterError> {
        let engine = self.engine().await?;
        let response = engine
            .generate(self.build_request(prompt))
            .await
            .map_err(|e| map_inference_error(self.id, &e))?;

        debug!(
            model = %response.model,
            chars = response.content.chars().count(),
            "Provider answered"
        );
        Ok(response.content)
    }
}

/// Normalize a client error into the adapter error taxonomy
pub(crate) fn map_inference_error(provider: ProviderId, err: &InferenceError) -> AdapterError {
    let kind = match err {
        InferenceError::ConnectionFailed(_) | InferenceError::RequestFailed(_) => {
            AdapterErrorKind::Network
        },
        InferenceError::Unauthorized(_) => AdapterErrorKind::Authentication,
        InferenceError::Timeout(_) => AdapterErrorKind::Timeout,
        InferenceError::RateLimited => AdapterErrorKind::RateLimited,
        InferenceError::InvalidResponse(_) => AdapterErrorKind::MalformedResponse,
        InferenceError::ModelNotAvailable(_) | InferenceError::ServerError(_) => {
            AdapterErrorKind::Api
        },
    };
    AdapterError::new(provider, kind, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::SystemPrompt;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prompt(user: &str) -> Prompt {
        Prompt::new(SystemPrompt::new("Tum Jarvis ho."), user).unwrap()
    }

    fn chat_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "model": "llama-3.1-70b-versatile",
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let adapter = ProviderAdapter::new(ProviderId::Groq, "m", None);
        assert!(!adapter.is_configured());

        let err = adapter.ask(&prompt("namaste")).await.unwrap_err();
        assert_eq!(err.provider, ProviderId::Groq);
        assert_eq!(err.kind, AdapterErrorKind::Authentication);
        assert!(err.to_string().contains("Groq API key is not configured"));
    }

    #[test]
    fn blank_key_leaves_adapter_unconfigured() {
        let adapter = ProviderAdapter::new(ProviderId::OpenAi, "m", Some(SecretString::from(" ")));
        assert!(!adapter.is_configured());
    }

    #[test]
    fn gemini_request_is_single_turn() {
        let adapter = ProviderAdapter::new(ProviderId::Gemini, "m", None);
        let request = adapter.build_request(&prompt("kaise ho?"));
        assert_eq!(request.messages.len(), 1);
        assert!(request.messages[0].content.starts_with("Tum Jarvis ho."));
        assert!(request.messages[0].content.ends_with("Assistant (Hindi):"));
    }

    #[test]
    fn chat_request_has_system_and_user() {
        let adapter = ProviderAdapter::new(ProviderId::Groq, "m", None);
        let request = adapter.build_request(&prompt("kaise ho?"));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content, "kaise ho?");
    }

    #[tokio::test]
    async fn groq_answer_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("  नमस्ते  ")))
            .expect(2)
            .mount(&server)
            .await;

        let adapter = ProviderAdapter::new(
            ProviderId::Groq,
            "llama-3.1-70b-versatile",
            Some(SecretString::from("gsk_test")),
        )
        .with_base_url(server.uri());

        assert_eq!(adapter.ask(&prompt("hi")).await.unwrap(), "नमस्ते");
        // Second call reuses the cached client
        assert_eq!(adapter.ask(&prompt("hi")).await.unwrap(), "नमस्ते");
    }

    #[tokio::test]
    async fn http_error_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let adapter = ProviderAdapter::new(ProviderId::OpenAi, "gpt-4o-mini", Some(SecretString::from("sk")))
            .with_base_url(server.uri());

        let err = adapter.ask(&prompt("hi")).await.unwrap_err();
        assert_eq!(err.provider, ProviderId::OpenAi);
        assert_eq!(err.kind, AdapterErrorKind::Authentication);
    }

    #[tokio::test]
    async fn gemini_missing_candidates_is_empty_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let adapter = ProviderAdapter::new(
            ProviderId::Gemini,
            "gemini-1.5-flash",
            Some(SecretString::from("AIza-test")),
        )
        .with_base_url(server.uri());

        assert_eq!(adapter.ask(&prompt("hi")).await.unwrap(), "");
    }

    #[test]
    fn error_kinds_map() {
        let cases = [
            (InferenceError::RateLimited, AdapterErrorKind::RateLimited),
            (InferenceError::Timeout(60_000), AdapterErrorKind::Timeout),
            (
                InferenceError::InvalidResponse("x".into()),
                AdapterErrorKind::MalformedResponse,
            ),
            (
                InferenceError::ConnectionFailed("dns".into()),
                AdapterErrorKind::Network,
            ),
            (InferenceError::ServerError("500".into()), AdapterErrorKind::Api),
        ];
        for (err, kind) in cases {
            assert_eq!(map_inference_error(ProviderId::Gemini, &err).kind, kind);
        }
    }
}
