//! Provider identifier - Names one text-generation backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Supported text-generation backends
///
/// The declaration order is the preference order used when building a
/// [`ProviderOrder`](crate::ProviderOrder) from available credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Groq's OpenAI-compatible chat completions API
    Groq,
    /// Google Gemini `generateContent` API
    Gemini,
    /// OpenAI chat completions API
    OpenAi,
}

impl ProviderId {
    /// All known providers in preference order
    pub const ALL: [Self; 3] = [Self::Groq, Self::Gemini, Self::OpenAi];

    /// Get the config key for this provider
    #[must_use]
    pub const fn config_key(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }

    /// Get the display name for this provider
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Groq => "Groq",
            Self::Gemini => "Gemini",
            Self::OpenAi => "OpenAI",
        }
    }

    /// Model used when no override is configured
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Groq => "llama-3.1-70b-versatile",
            Self::Gemini => "gemini-1.5-flash",
            Self::OpenAi => "gpt-4o-mini",
        }
    }

    /// Parse from config string (case-insensitive)
    #[must_use]
    pub fn from_config(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "gemini" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

impl FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_config(s).ok_or_else(|| DomainError::UnknownProvider(s.to_string()))
    }
}
