//! Configuration for speech synthesis

use serde::{Deserialize, Serialize};

/// Configuration for the Google Translate TTS provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the translate host, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Spoken language (ISO 639-1)
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in milliseconds, per chunk
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum characters per request; the endpoint rejects longer input
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Slower speech
    #[serde(default)]
    pub slow: bool,

    /// Stem of the upload filename
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Track title shown by chat clients
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_base_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_language() -> String {
    "hi".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_chunk_chars() -> usize {
    100
}

fn default_file_stem() -> String {
    "jarvis_hi".to_string()
}

fn default_title() -> String {
    "Jarvis (Hindi)".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            timeout_ms: default_timeout_ms(),
            max_chunk_chars: default_max_chunk_chars(),
            slow: false,
            file_stem: default_file_stem(),
            title: default_title(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.language.trim().is_empty() {
            return Err("Language must not be empty".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_chunk_chars < 10 {
            return Err(format!(
                "Chunk size must be at least 10 characters, got {}",
                self.max_chunk_chars
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("Base URL must be http(s), got {}", self.base_url));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_speaks_hindi() {
        let config = SpeechConfig::default();
        assert_eq!(config.language, "hi");
        assert_eq!(config.max_chunk_chars, 100);
        assert_eq!(config.file_stem, "jarvis_hi");
        assert_eq!(config.title, "Jarvis (Hindi)");
        assert!(!config.slow);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SpeechConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_fails_with_zero_timeout() {
        let config = SpeechConfig {
            timeout_ms: 0,
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_with_tiny_chunks() {
        let config = SpeechConfig {
            max_chunk_chars: 3,
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_with_blank_language() {
        let config = SpeechConfig {
            language: " ".to_string(),
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_with_bad_url() {
        let config = SpeechConfig {
            base_url: "translate.google.com".to_string(),
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_partial_toml() {
        let config: SpeechConfig = toml::from_str("language = \"en\"\nslow = true").unwrap();
        assert_eq!(config.language, "en");
        assert!(config.slow);
        assert_eq!(config.timeout_ms, 30000);
    }
}
