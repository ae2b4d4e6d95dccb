//! Application services - Use case implementations

mod command_service;
mod fallback_orchestrator;
mod message_handler;

pub use command_service::CommandService;
pub use fallback_orchestrator::FallbackOrchestrator;
pub use message_handler::{HandleOutcome, MessageHandler};
