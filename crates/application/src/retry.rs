//! Retry policy applied around every provider call
//!
//! The fallback orchestrator owns the loop; this module only decides how many
//! attempts a provider gets and how long to wait after each failed one.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay schedule between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backoff {
    /// Retry immediately
    None,
    /// Same delay after every failure
    Fixed {
        /// Delay in milliseconds
        delay_ms: u64,
    },
    /// `step * (attempt + 1)`: 0.7s, 1.4s, 2.1s with the default step
    Linear {
        /// Step in milliseconds
        step_ms: u64,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Linear {
            step_ms: default_step_ms(),
        }
    }
}

const fn default_step_ms() -> u64 {
    700
}

const fn default_max_attempts() -> u32 {
    3
}

/// How often a single provider is tried before moving on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts per provider, at least one (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay schedule (default: linear 700ms steps)
    #[serde(default)]
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff: Backoff::default(),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with linear backoff
    #[must_use]
    pub const fn linear(max_attempts: u32, step_ms: u64) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Linear { step_ms },
        }
    }

    /// One attempt per provider and no waiting
    #[must_use]
    pub const fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            backoff: Backoff::None,
        }
    }

    /// Attempts per provider, never less than one
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay after the given failed attempt (0-indexed)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed { delay_ms } => Duration::from_millis(delay_ms),
            Backoff::Linear { step_ms } => {
                Duration::from_millis(step_ms.saturating_mul(u64::from(attempt) + 1))
            },
        }
    }

    /// Sum of all delays one fully failing provider incurs
    #[must_use]
    pub fn total_backoff_per_provider(&self) -> Duration {
        (0..self.attempts()).map(|a| self.delay_for_attempt(a)).sum()
    }
}
