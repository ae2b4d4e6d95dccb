//! Domain layer for the Jarvis relay
//!
//! Contains the provider vocabulary, prompt and answer entities, and domain errors.
//! This layer has no I/O and defines the ubiquitous language shared by all crates.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use commands::BotCommand;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
