//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the configuration loader and adapters for the text providers,
//! speech synthesis and Telegram.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, DEFAULT_SECRET_TOKEN, LogFormat};
