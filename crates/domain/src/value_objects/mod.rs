//! Value Objects - Immutable, identity-less domain primitives

mod chat_id;
mod provider_id;
mod provider_models;
mod provider_order;

pub use chat_id::ChatId;
pub use provider_id::ProviderId;
pub use provider_models::ProviderModels;
pub use provider_order::{FALLBACK_PROVIDER, ProviderOrder};
