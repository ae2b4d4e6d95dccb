//! Text provider port - one interchangeable text-generation backend

use async_trait::async_trait;
use domain::{Prompt, ProviderId};
#[cfg(test)]
use mockall::automock;

use crate::error::AdapterError;

/// Uniform contract for every text-generation backend
///
/// Implementations translate the prompt into their backend's request format
/// and return the trimmed reply text. An empty string is a valid return value;
/// the orchestrator decides what to do with it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Identifier of the backend
    fn id(&self) -> ProviderId;

    /// Ask the backend for a reply
    async fn ask(&self, prompt: &Prompt) -> Result<String, AdapterError>;
}
