//! Prompt - system instruction plus user text

use std::fmt;
use std::sync::Arc;

use crate::errors::DomainError;

/// Personality used when no override is configured
pub const DEFAULT_SYSTEM_PROMPT: &str = "Tum ek helpful, accurate assistant ho jo HINDI me seedha aur clear jawab deta hai. \
Jarurat par bullet points aur exact dates/numbers do. \
Galti ho to vinamrata se sudharo. Unsafe/toxic cheezein avoid karo.";

/// Fixed personality/style instruction, constant for the process lifetime
///
/// Cheap to clone; every prompt shares the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt(Arc<str>);

impl SystemPrompt {
    /// Create a system prompt; blank text falls back to the default personality
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim();
        if text.is_empty() {
            Self::default()
        } else {
            Self(Arc::from(text))
        }
    }

    /// Prompt text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self(Arc::from(DEFAULT_SYSTEM_PROMPT))
    }
}

impl fmt::Display for SystemPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single request to a text-generation provider
///
/// Combined into the provider-specific request shape at call time and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system: SystemPrompt,
    user: String,
}

impl Prompt {
    /// Create a prompt; the user text is used as-is but must not be blank
    pub fn new(system: SystemPrompt, user: impl Into<String>) -> Result<Self, DomainError> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(DomainError::EmptyText);
        }
        Ok(Self { system, user })
    }

    /// System instruction
    pub fn system(&self) -> &str {
        self.system.as_str()
    }

    /// User text
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Flatten into a single completion-style prompt for providers without
    /// separate system and user roles
    pub fn as_single_turn(&self) -> String {
        format!("{}\n\nUser: {}\nAssistant (Hindi):", self.system, self.user)
    }
}
