//! Fallback orchestrator
//!
//! Tries the configured providers strictly in order, gives each a bounded
//! number of attempts, and returns the first non-empty answer. When every
//! provider is exhausted it returns an apology instead of an error.

use std::sync::Arc;
use std::time::Duration;

use domain::{AnswerResult, Prompt, ProviderId, ProviderOrder, SystemPrompt};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{AdapterError, ApplicationError},
    ports::TextProvider,
    retry::RetryPolicy,
};

/// Sequential provider fallback with per-provider retries
///
/// # Example
///
/// ```ignore
/// let orchestrator = FallbackOrchestrator::new(order, providers)?
///     .with_deadline(Some(Duration::from_secs(45)));
///
/// let answer = orchestrator.answer("Bharat ki rajdhani kya hai?").await;
/// ```
#[derive(Clone)]
pub struct FallbackOrchestrator {
    order: ProviderOrder,
    providers: Vec<Arc<dyn TextProvider>>,
    system_prompt: SystemPrompt,
    policy: RetryPolicy,
    deadline: Option<Duration>,
}

impl std::fmt::Debug for FallbackOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackOrchestrator")
            .field("order", &self.order)
            .field("policy", &self.policy)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl FallbackOrchestrator {
    /// Create an orchestrator for the given order
    ///
    /// `providers` may contain more adapters than the order names; only those
    /// in the order are used, in order. Fails if the order names a provider
    /// with no adapter.
    pub fn new(
        order: ProviderOrder,
        providers: impl IntoIterator<Item = Arc<dyn TextProvider>>,
    ) -> Result<Self, ApplicationError> {
        let available: Vec<Arc<dyn TextProvider>> = providers.into_iter().collect();

        let mut ordered = Vec::with_capacity(order.len());
        for id in order.iter() {
            let provider = available
                .iter()
                .find(|p| p.id() == id)
                .ok_or_else(|| {
                    ApplicationError::Configuration(format!("No adapter registered for provider {id}"))
                })?;
            ordered.push(Arc::clone(provider));
        }

        Ok(Self {
            order,
            providers: ordered,
            system_prompt: SystemPrompt::default(),
            policy: RetryPolicy::default(),
            deadline: None,
        })
    }

    /// Use a custom personality
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: SystemPrompt) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    /// Use a custom retry policy
    #[must_use]
    pub const fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound the whole fallback sequence
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Active provider order
    pub fn order(&self) -> &ProviderOrder {
        &self.order
    }

    /// Retry policy in use
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Produce an answer for the user text
    ///
    /// Never fails: exhaustion, an elapsed deadline or unusable input all
    /// yield the apology with the `none` source.
    #[allow(clippy::cast_possible_truncation)]
    #[instrument(skip(self, user_text), fields(order = %self.order, text_len = user_text.len()))]
    pub async fn answer(&self, user_text: &str) -> AnswerResult {
        let prompt = match Prompt::new(self.system_prompt.clone(), user_text) {
            Ok(prompt) => prompt,
            Err(e) => {
                debug!(error = %e, "Rejected prompt");
                return AnswerResult::apology(e);
            },
        };

        let start = tokio::time::Instant::now();
        let result = match self.deadline {
            Some(limit) => match tokio::time::timeout(limit, self.run(&prompt)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(deadline_ms = limit.as_millis() as u64, "Answer deadline elapsed");
                    AnswerResult::apology(format!("no answer within {}s", limit.as_secs()))
                },
            },
            None => self.run(&prompt).await,
        };

        info!(
            source = %result.source,
            duration_ms = start.elapsed().as_millis() as u64,
            "Answer ready"
        );
        result
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn run(&self, prompt: &Prompt) -> AnswerResult {
        let attempts = self.policy.attempts();
        let mut last_error: Option<AdapterError> = None;

        for provider in &self.providers {
            let id = provider.id();
            for attempt in 0..attempts {
                match provider.ask(prompt).await {
                    Ok(text) => {
                        let text = text.trim();
                        if !text.is_empty() {
                            if attempt > 0 {
                                debug!(provider = %id, attempts = attempt + 1, "Provider succeeded after retries");
                            }
                            return AnswerResult::answered(text, id);
                        }
                        last_error = Some(AdapterError::empty_response(id));
                    },
                    Err(e) => last_error = Some(e),
                }

                let delay = self.policy.delay_for_attempt(attempt);
                warn!(
                    provider = %id,
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %describe(last_error.as_ref(), id),
                    "Provider attempt failed"
                );
                tokio::time::sleep(delay).await;
            }
            warn!(provider = %id, "Provider exhausted, falling back");
        }

        AnswerResult::apology(describe(last_error.as_ref(), self.order.first()))
    }
}

fn describe(error: Option<&AdapterError>, fallback: ProviderId) -> String {
    error.map_or_else(
        || AdapterError::empty_response(fallback).to_string(),
        ToString::to_string,
    )
}
