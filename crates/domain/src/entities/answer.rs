//! Answer produced by the fallback orchestrator

use std::fmt;

use serde::{Serialize, Serializer};

use crate::value_objects::ProviderId;

/// User-facing text sent when every provider is exhausted
pub const APOLOGY_TEXT: &str = "Maaf kijiye, abhi servers vyast hain. Thodi der baad koshish karein.";

/// Which backend produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerSource {
    /// A provider from the active order
    Provider(ProviderId),
    /// Sentinel for total failure
    None,
}

impl AnswerSource {
    /// Config key of the provider, or `"none"`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Provider(id) => id.config_key(),
            Self::None => "none",
        }
    }
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AnswerSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<ProviderId> for AnswerSource {
    fn from(id: ProviderId) -> Self {
        Self::Provider(id)
    }
}

/// Reply text and the backend that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    /// Text to send back to the chat
    pub text: String,
    /// Producing provider or the sentinel
    pub source: AnswerSource,
}

impl AnswerResult {
    /// A successful answer from a provider
    pub fn answered(text: impl Into<String>, provider: ProviderId) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Provider(provider),
        }
    }

    /// The apology returned after all providers are exhausted
    pub fn apology(last_error: impl fmt::Display) -> Self {
        Self {
            text: format!("{APOLOGY_TEXT}\n(Tech: {last_error})"),
            source: AnswerSource::None,
        }
    }

    /// Whether this is the apology rather than a provider answer
    pub fn is_apology(&self) -> bool {
        self.source == AnswerSource::None
    }

    /// Provider that answered, if any
    pub fn provider(&self) -> Option<ProviderId> {
        match self.source {
            AnswerSource::Provider(id) => Some(id),
            AnswerSource::None => None,
        }
    }
}
