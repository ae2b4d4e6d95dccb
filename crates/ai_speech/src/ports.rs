//! The seam between the relay and a text-to-speech backend.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::AudioData;

/// Turns a reply into a playable clip.
///
/// Implementations do not retry; the caller drops the audio on any error.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Speak `text` in `language`, or in the configured language when `None`.
    ///
    /// Blank text is a `SynthesisFailed` without any request going out.
    async fn synthesize(&self, text: &str, language: Option<&str>) -> Result<AudioData, SpeechError>;

    fn provider_name(&self) -> &'static str;
}
