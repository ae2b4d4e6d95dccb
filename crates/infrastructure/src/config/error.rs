//! Configuration errors

use thiserror::Error;

/// Errors raised while loading or validating [`super::AppConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required value is absent or blank
    #[error("{0} is required")]
    Missing(&'static str),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
