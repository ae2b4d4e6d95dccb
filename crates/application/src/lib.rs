//! Application layer - Use cases and orchestration
//!
//! Contains the provider fallback orchestrator, the inbound message handler
//! and the port definitions implemented by infrastructure adapters.

pub mod error;
pub mod ports;
pub mod retry;
pub mod services;

pub use error::{AdapterError, AdapterErrorKind, ApplicationError};
pub use ports::*;
pub use retry::{Backoff, RetryPolicy};
pub use services::*;
