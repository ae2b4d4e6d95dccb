//! Domain-level errors

use thiserror::Error;

use crate::value_objects::ProviderId;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A provider order must name at least one provider
    #[error("Provider order cannot be empty")]
    EmptyProviderOrder,

    /// A provider was listed more than once
    #[error("Provider listed more than once: {0}")]
    DuplicateProvider(ProviderId),

    /// A provider name did not match any known provider
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Text input was empty or whitespace only
    #[error("Text cannot be empty")]
    EmptyText,
}
