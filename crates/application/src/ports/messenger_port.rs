//! Messenger port - Interface for the chat platform the bot talks through

use async_trait::async_trait;
use domain::{AudioBlob, ChatId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A text message received from the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Chat the message came from
    pub chat_id: ChatId,
    /// Platform message id, used to thread replies
    pub message_id: i64,
    /// Message text as sent
    pub text: String,
    /// Sender display name, if known
    pub sender: Option<String>,
}

/// Activity indicator shown to the user while the bot works
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    /// "typing…"
    Typing,
    /// "recording voice…"
    RecordVoice,
}

impl ChatAction {
    /// Wire name used by the platform
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::RecordVoice => "record_voice",
        }
    }
}

/// Port for sending replies and managing the platform session
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Send a text message, optionally as a reply to `reply_to`
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<(), ApplicationError>;

    /// Upload an audio file, optionally as a reply to `reply_to`
    async fn send_audio(
        &self,
        chat_id: ChatId,
        audio: AudioBlob,
        reply_to: Option<i64>,
    ) -> Result<(), ApplicationError>;

    /// Show an activity indicator
    async fn send_chat_action(
        &self,
        chat_id: ChatId,
        action: ChatAction,
    ) -> Result<(), ApplicationError>;

    /// Point the platform at our webhook
    async fn register_webhook(&self, url: &str, secret_token: &str)
    -> Result<(), ApplicationError>;

    /// Release platform resources at shutdown
    async fn shutdown(&self) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_action_wire_names() {
        assert_eq!(ChatAction::Typing.as_str(), "typing");
        assert_eq!(ChatAction::RecordVoice.as_str(), "record_voice");
    }
}
