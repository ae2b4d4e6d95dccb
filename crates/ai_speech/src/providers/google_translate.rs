//! Google Translate TTS provider
//!
//! Uses the public `translate_tts` endpoint, the same one the gTTS library
//! talks to. The endpoint accepts short inputs only, so text is split into
//! chunks and the returned MP3 fragments are concatenated in order. MP3 frames
//! are self-delimiting, so the concatenation plays as one file.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::chunking::split_text;
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

/// Browser-like agent; the endpoint refuses requests without one
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google Translate text-to-speech
#[derive(Debug)]
pub struct GoogleTranslateTts {
    client: Client,
    config: SpeechConfig,
}

impl GoogleTranslateTts {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Build the TTS endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.base_url)
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();
        let speed = if self.config.slow { "0.24" } else { "1" };

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
                ("ttsspeed", speed),
            ])
            .send()
            .await
            .map_err(|e| SpeechError::from_reqwest(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, chunk = %idx, "TTS request failed");
            return Err(match status.as_u16() {
                429 => SpeechError::RateLimited,
                500..=599 => SpeechError::ServiceUnavailable(format!("Status {status}")),
                _ => SpeechError::SynthesisFailed(format!("Status {status}: {body}")),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/html"));
        if is_html {
            return Err(SpeechError::InvalidResponse(
                "Expected audio, got an HTML page".to_string(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::from_reqwest(&e, self.config.timeout_ms))?;

        if bytes.is_empty() {
            return Err(SpeechError::InvalidResponse("Empty audio".to_string()));
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TextToSpeech for GoogleTranslateTts {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, language: Option<&str>) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let language = language.unwrap_or(&self.config.language);
        let chunks = split_text(text, self.config.max_chunk_chars);
        debug!(chunks = chunks.len(), language = %language, "Synthesizing speech");

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            audio.extend_from_slice(&bytes);
        }

        debug!(bytes = audio.len(), "Speech synthesized");
        Ok(AudioData::new(audio, AudioFormat::Mp3))
    }

    fn provider_name(&self) -> &'static str {
        "google-translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let config = SpeechConfig {
            timeout_ms: 0,
            ..SpeechConfig::default()
        };
        assert!(matches!(
            GoogleTranslateTts::new(config),
            Err(SpeechError::Configuration(_))
        ));
    }

    #[test]
    fn tts_url_uses_base() {
        let tts = GoogleTranslateTts::new(SpeechConfig::default()).unwrap();
        assert_eq!(tts.tts_url(), "https://translate.google.com/translate_tts");
        assert_eq!(tts.provider_name(), "google-translate");
    }

    #[tokio::test]
    async fn empty_text_fails_without_request() {
        let config = SpeechConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..SpeechConfig::default()
        };
        let tts = GoogleTranslateTts::new(config).unwrap();
        let err = tts.synthesize("   ", None).await.unwrap_err();
        assert_eq!(err.to_string(), "TTS synthesis failed: Text cannot be empty");
    }
}
