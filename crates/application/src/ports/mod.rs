//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod messenger_port;
mod speech_port;
mod text_provider;

#[cfg(test)]
pub use messenger_port::MockMessengerPort;
pub use messenger_port::{ChatAction, InboundMessage, MessengerPort};
#[cfg(test)]
pub use speech_port::MockSpeechSynthesizerPort;
pub use speech_port::SpeechSynthesizerPort;
#[cfg(test)]
pub use text_provider::MockTextProvider;
pub use text_provider::TextProvider;
