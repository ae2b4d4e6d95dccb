//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::ProviderClientConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

/// Gemini inference engine
///
/// System messages become the `systemInstruction`; assistant turns map to the
/// `model` role. A response without candidate text is an empty answer, not an
/// error.
pub struct GeminiEngine {
    client: Client,
    config: ProviderClientConfig,
}

impl std::fmt::Debug for GeminiEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiEngine {
    /// Create a new Gemini engine
    pub fn new(config: ProviderClientConfig) -> Result<Self, InferenceError> {
        if !config.has_api_key() {
            return Err(InferenceError::Unauthorized("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Gemini engine"
        );

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

fn text_content(role: &str, text: &str) -> Content {
    Content {
        role: Some(role.to_string()),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

impl GenerateContentRequest {
    fn from_request(request: &InferenceRequest, default_temperature: Option<f32>) -> Self {
        let system: Vec<&str> = request
            .messages
            .iter()
            .filter(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .collect();

        let contents = request
            .messages
            .iter()
            .filter(|m| m.role != "system")
            .map(|m| {
                let role = if m.role == "assistant" { "model" } else { "user" };
                text_content(role, &m.content)
            })
            .collect();

        Self {
            contents,
            system_instruction: (!system.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part {
                    text: Some(system.join("\n")),
                }],
            }),
            generation_config: request
                .temperature
                .or(default_temperature)
                .map(|temperature| GenerationConfig { temperature }),
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined; empty when absent
    fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl InferenceEngine for GeminiEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError> {
        let body = GenerateContentRequest::from_request(&request, self.config.temperature);

        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Gemini request failed");
            return Err(InferenceError::from_status(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let content = parsed.first_text().trim().to_string();
        if content.is_empty() {
            debug!(candidates = parsed.candidates.len(), "Gemini returned no text");
        }

        let usage = parsed.usage_metadata.as_ref().map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(InferenceResponse {
            content,
            model: parsed
                .model_version
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            usage,
            finish_reason: parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone()),
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
