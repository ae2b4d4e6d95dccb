//! Speech synthesis errors

use thiserror::Error;

/// Why a clip could not be produced.
///
/// Callers treat every variant the same way (skip the audio), the split
/// only matters for logs and tests.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("TTS endpoint unreachable: {0}")]
    ConnectionFailed(String),

    #[error("TTS request failed: {0}")]
    RequestFailed(String),

    /// The backend refused the text, or the text was empty.
    #[error("TTS synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Got a response, but not audio.
    #[error("TTS returned unusable data: {0}")]
    InvalidResponse(String),

    #[error("TTS gave no answer within {0}ms")]
    Timeout(u64),

    #[error("TTS endpoint is throttling requests")]
    RateLimited,

    #[error("TTS misconfigured: {0}")]
    Configuration(String),

    #[error("TTS endpoint unavailable: {0}")]
    ServiceUnavailable(String),
}

impl SpeechError {
    /// Classify a transport failure; timeouts report the client's limit.
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
