//! Provider order - The fixed preference list consulted by the fallback orchestrator

use std::fmt;

use serde::Serialize;

use super::ProviderId;
use crate::errors::DomainError;

/// Provider used when no credential is configured at all
pub const FALLBACK_PROVIDER: ProviderId = ProviderId::Gemini;

/// Ordered, non-empty list of distinct providers
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOrder(Vec<ProviderId>);

impl ProviderOrder {
    /// Create an order from an explicit list
    ///
    /// Rejects empty lists and lists naming a provider twice.
    pub fn new(providers: Vec<ProviderId>) -> Result<Self, DomainError> {
        if providers.is_empty() {
            return Err(DomainError::EmptyProviderOrder);
        }
        for (idx, id) in providers.iter().enumerate() {
            if providers[..idx].contains(id) {
                return Err(DomainError::DuplicateProvider(*id));
            }
        }
        Ok(Self(providers))
    }

    /// Build the order from the providers that have credentials
    ///
    /// Preference is groq, gemini, openai. When nothing is available the order
    /// falls back to [`FALLBACK_PROVIDER`] alone.
    pub fn from_available(is_available: impl Fn(ProviderId) -> bool) -> Self {
        let providers: Vec<ProviderId> = ProviderId::ALL
            .into_iter()
            .filter(|id| is_available(*id))
            .collect();

        if providers.is_empty() {
            Self(vec![FALLBACK_PROVIDER])
        } else {
            Self(providers)
        }
    }

    /// Parse a comma separated list such as `"gemini,groq"`
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let providers = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(providers)
    }

    /// Providers in the order they are tried
    pub fn as_slice(&self) -> &[ProviderId] {
        &self.0
    }

    /// Iterate providers in order
    pub fn iter(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.0.iter().copied()
    }

    /// The provider tried first
    pub fn first(&self) -> ProviderId {
        self.0[0]
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an order is never empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the order includes the given provider
    pub fn contains(&self, id: ProviderId) -> bool {
        self.0.contains(&id)
    }
}

impl fmt::Display for ProviderOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, id) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ProviderOrder {
    type Item = &'a ProviderId;
    type IntoIter = std::slice::Iter<'a, ProviderId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
