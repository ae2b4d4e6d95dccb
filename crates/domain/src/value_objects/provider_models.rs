//! Model names per provider

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ProviderId;

/// Model name for every known provider, active or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderModels {
    /// Groq model
    pub groq: String,
    /// Gemini model
    pub gemini: String,
    /// OpenAI model
    pub openai: String,
}

impl Default for ProviderModels {
    fn default() -> Self {
        Self {
            groq: ProviderId::Groq.default_model().to_string(),
            gemini: ProviderId::Gemini.default_model().to_string(),
            openai: ProviderId::OpenAi.default_model().to_string(),
        }
    }
}

impl ProviderModels {
    /// Model configured for a provider
    #[must_use]
    pub fn model_for(&self, id: ProviderId) -> &str {
        match id {
            ProviderId::Groq => &self.groq,
            ProviderId::Gemini => &self.gemini,
            ProviderId::OpenAi => &self.openai,
        }
    }

    /// Override the model for one provider; blank names keep the current value
    #[must_use]
    pub fn with_model(mut self, id: ProviderId, model: impl Into<String>) -> Self {
        let model = model.into();
        if model.trim().is_empty() {
            return self;
        }
        match id {
            ProviderId::Groq => self.groq = model,
            ProviderId::Gemini => self.gemini = model,
            ProviderId::OpenAi => self.openai = model,
        }
        self
    }
}

impl fmt::Display for ProviderModels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = ProviderId::ALL
            .iter()
            .map(|id| format!("{id}: {}", self.model_for(*id)))
            .collect();
        f.write_str(&entries.join(", "))
    }
}
