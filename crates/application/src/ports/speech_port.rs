//! Speech port - Interface for text-to-speech

use async_trait::async_trait;
use domain::AudioBlob;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech synthesis in the bot's spoken language
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// Synthesize speech from non-empty text
    ///
    /// # Returns
    /// Audio ready for upload, positioned at its start
    async fn synthesize(&self, text: &str) -> Result<AudioBlob, ApplicationError>;
}
