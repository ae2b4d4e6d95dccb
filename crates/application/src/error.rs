//! Application-level errors

use domain::{DomainError, ProviderId};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Text provider failure
    #[error(transparent)]
    Provider(#[from] AdapterError),

    /// Speech synthesis failed
    #[error("Speech error: {0}")]
    Speech(String),

    /// Messaging platform rejected or failed a call
    #[error("Messenger error: {0}")]
    Messenger(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Failure category of a single provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    /// Connection, DNS or transport failure
    Network,
    /// Request exceeded its time limit
    Timeout,
    /// Credential missing or rejected
    Authentication,
    /// Backend asked us to slow down
    RateLimited,
    /// Backend answered with a non-success status
    Api,
    /// Response body did not have the expected shape
    MalformedResponse,
    /// Backend answered with no usable text
    EmptyResponse,
}

/// Uniform error for every text provider adapter
///
/// Carries the provider that failed and a human-readable cause. Its display
/// text is what ends up in the user-facing apology.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{provider}: {message}")]
pub struct AdapterError {
    /// Provider that failed
    pub provider: ProviderId,
    /// Failure category
    pub kind: AdapterErrorKind,
    /// Underlying cause
    pub message: String,
}

impl AdapterError {
    /// Create a new adapter error
    pub fn new(provider: ProviderId, kind: AdapterErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            message: message.into(),
        }
    }

    /// The provider returned nothing usable
    pub fn empty_response(provider: ProviderId) -> Self {
        Self::new(provider, AdapterErrorKind::EmptyResponse, "Empty response")
    }

    /// The provider has no credential configured
    pub fn missing_credential(provider: ProviderId) -> Self {
        Self::new(
            provider,
            AdapterErrorKind::Authentication,
            format!("{} API key is not configured", provider.display_name()),
        )
    }
}
