//! Provider registry
//!
//! Builds one adapter per known provider from [`AppConfig`] and assembles the
//! fallback orchestrator over them.

use std::sync::Arc;

use application::ports::TextProvider;
use application::{ApplicationError, FallbackOrchestrator};
use domain::ProviderId;
use tracing::info;

use super::ProviderAdapter;
use crate::config::AppConfig;

/// One adapter per provider, configured or not
pub fn provider_adapters(config: &AppConfig) -> Vec<Arc<dyn TextProvider>> {
    let models = config.models();
    ProviderId::ALL
        .into_iter()
        .map(|id| {
            let adapter = ProviderAdapter::new(id, models.model_for(id), config.api_key(id).cloned())
                .with_timeout_ms(config.provider_timeout_ms());
            Arc::new(adapter) as Arc<dyn TextProvider>
        })
        .collect()
}

/// Build the orchestrator described by the configuration
///
/// # Errors
///
/// Returns an error if the provider order is invalid.
pub fn build_orchestrator(config: &AppConfig) -> Result<FallbackOrchestrator, ApplicationError> {
    let order = config
        .provider_order()
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

    info!(
        order = %order,
        models = %config.models(),
        attempts = config.provider_attempts,
        "Provider fallback configured"
    );

    Ok(FallbackOrchestrator::new(order, provider_adapters(config))?
        .with_system_prompt(config.system_prompt())
        .with_policy(config.retry_policy())
        .with_deadline(config.answer_deadline()))
}
