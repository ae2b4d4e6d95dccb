//! Inbound message handler
//!
//! Drives one message through typing indicator, answer, text reply and a
//! best-effort audio reply. Only the answer and the text reply are mandatory;
//! indicator and audio failures are logged and never abort the reply.

use std::sync::Arc;

use domain::{AnswerSource, BotCommand};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ChatAction, InboundMessage, MessengerPort, SpeechSynthesizerPort},
    services::{CommandService, FallbackOrchestrator},
};

/// What happened to an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// A provider answer (or the apology) was sent
    Answered {
        /// Producing provider or the sentinel
        source: AnswerSource,
        /// Whether the audio reply was uploaded
        audio_sent: bool,
    },
    /// A command reply was sent
    Command(BotCommand),
    /// Nothing to do (blank text or unknown command)
    Ignored,
}

/// Per-message pipeline from inbound text to text and audio replies
#[derive(Clone)]
pub struct MessageHandler {
    orchestrator: Arc<FallbackOrchestrator>,
    commands: CommandService,
    messenger: Arc<dyn MessengerPort>,
    speech: Arc<dyn SpeechSynthesizerPort>,
}

impl std::fmt::Debug for MessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandler")
            .field("orchestrator", &self.orchestrator)
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}

impl MessageHandler {
    /// Create a new handler
    pub fn new(
        orchestrator: Arc<FallbackOrchestrator>,
        commands: CommandService,
        messenger: Arc<dyn MessengerPort>,
        speech: Arc<dyn SpeechSynthesizerPort>,
    ) -> Self {
        Self {
            orchestrator,
            commands,
            messenger,
            speech,
        }
    }

    /// Handle one inbound message
    ///
    /// Fails only when the text reply cannot be delivered.
    #[instrument(
        skip(self, message),
        fields(
            chat_id = %message.chat_id,
            message_id = message.message_id,
            sender = message.sender.as_deref().unwrap_or("unknown"),
        )
    )]
    pub async fn handle(&self, message: InboundMessage) -> Result<HandleOutcome, ApplicationError> {
        if message.text.trim().is_empty() {
            debug!("Ignoring blank message");
            return Ok(HandleOutcome::Ignored);
        }

        if BotCommand::is_command(&message.text) {
            return self.handle_command(&message).await;
        }

        self.indicate(&message, ChatAction::Typing).await;

        let answer = self.orchestrator.answer(&message.text).await;

        self.messenger
            .send_text(message.chat_id, &answer.text, Some(message.message_id))
            .await?;
        info!(source = %answer.source, "Text reply sent");

        let audio_sent = self.send_audio_reply(&message, &answer.text).await;

        Ok(HandleOutcome::Answered {
            source: answer.source,
            audio_sent,
        })
    }

    async fn handle_command(&self, message: &InboundMessage) -> Result<HandleOutcome, ApplicationError> {
        let Some(command) = BotCommand::parse(&message.text) else {
            debug!(text = %message.text, "Ignoring unknown command");
            return Ok(HandleOutcome::Ignored);
        };

        let reply = self.commands.respond(command);
        self.messenger
            .send_text(message.chat_id, &reply, Some(message.message_id))
            .await?;
        info!(command = command.name(), "Command reply sent");

        Ok(HandleOutcome::Command(command))
    }

    async fn indicate(&self, message: &InboundMessage, action: ChatAction) {
        if let Err(e) = self.messenger.send_chat_action(message.chat_id, action).await {
            warn!(action = action.as_str(), error = %e, "Failed to send chat action");
        }
    }

    async fn send_audio_reply(&self, message: &InboundMessage, text: &str) -> bool {
        self.indicate(message, ChatAction::RecordVoice).await;

        let result = match self.speech.synthesize(text).await {
            Ok(audio) => {
                debug!(bytes = audio.len(), "Speech synthesized");
                self.messenger
                    .send_audio(message.chat_id, audio, Some(message.message_id))
                    .await
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Audio reply sent");
                true
            },
            Err(e) => {
                warn!(error = %e, "Audio reply failed");
                let note = format!("(Audio issue: {e})");
                if let Err(e) = self
                    .messenger
                    .send_text(message.chat_id, &note, Some(message.message_id))
                    .await
                {
                    warn!(error = %e, "Failed to send audio issue note");
                }
                false
            },
        }
    }
}
