//! Speech adapter - Implements `SpeechSynthesizerPort` using the ai_speech crate

use std::sync::Arc;

use ai_speech::{GoogleTranslateTts, SpeechConfig, SpeechError, TextToSpeech};
use application::error::ApplicationError;
use application::ports::SpeechSynthesizerPort;
use async_trait::async_trait;
use domain::AudioBlob;
use tracing::{debug, instrument};

/// Adapter that turns reply text into an uploadable audio file
pub struct SpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
    language: String,
    file_stem: String,
    title: String,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("provider", &self.provider.provider_name())
            .field("language", &self.language)
            .field("file_stem", &self.file_stem)
            .finish_non_exhaustive()
    }
}

impl SpeechAdapter {
    /// Create an adapter backed by Google Translate TTS
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = GoogleTranslateTts::new(config.clone())
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_provider(Arc::new(provider), &config))
    }

    /// Create an adapter around any TTS provider
    pub fn with_provider(provider: Arc<dyn TextToSpeech>, config: &SpeechConfig) -> Self {
        Self {
            provider,
            language: config.language.clone(),
            file_stem: config.file_stem.clone(),
            title: config.title.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %self.language))]
    async fn synthesize(&self, text: &str) -> Result<AudioBlob, ApplicationError> {
        let audio = self
            .provider
            .synthesize(text, Some(&self.language))
            .await
            .map_err(|e| ApplicationError::Speech(e.to_string()))?;

        let filename = audio.filename(&self.file_stem);
        let mime_type = audio.mime_type();
        debug!(bytes = audio.len(), filename = %filename, "Speech synthesized");

        Ok(AudioBlob::new(audio.into_data(), mime_type, filename).with_title(self.title.clone()))
    }
}
