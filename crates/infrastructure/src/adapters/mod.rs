//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod provider_adapter;
mod provider_registry;
mod speech_adapter;
mod telegram_adapter;

pub use provider_adapter::ProviderAdapter;
pub use provider_registry::{build_orchestrator, provider_adapters};
pub use speech_adapter::SpeechAdapter;
pub use telegram_adapter::TelegramMessengerAdapter;
