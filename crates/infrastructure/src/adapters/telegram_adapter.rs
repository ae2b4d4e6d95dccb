//! Telegram messenger adapter
//!
//! Implements the `MessengerPort` trait using the Telegram integration crate.

use application::error::ApplicationError;
use application::ports::{ChatAction, MessengerPort};
use async_trait::async_trait;
use domain::{AudioBlob, ChatId};
use integration_telegram::{AudioUpload, TelegramClient, TelegramClientConfig, TelegramError};
use tracing::{debug, info, instrument};

/// Adapter that implements `MessengerPort` using `TelegramClient`
#[derive(Debug)]
pub struct TelegramMessengerAdapter {
    client: TelegramClient,
    delete_webhook_on_shutdown: bool,
}

fn messenger_error(action: &str, err: &TelegramError) -> ApplicationError {
    ApplicationError::Messenger(format!("Telegram {action} failed: {err}"))
}

impl TelegramMessengerAdapter {
    /// Create a new Telegram messenger adapter
    ///
    /// # Errors
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: TelegramClientConfig) -> Result<Self, TelegramError> {
        Ok(Self {
            client: TelegramClient::new(config)?,
            delete_webhook_on_shutdown: false,
        })
    }

    /// Remove the webhook registration on shutdown
    #[must_use]
    pub const fn with_delete_webhook_on_shutdown(mut self, enabled: bool) -> Self {
        self.delete_webhook_on_shutdown = enabled;
        self
    }

}

#[async_trait]
impl MessengerPort for TelegramMessengerAdapter {
    #[instrument(skip(self, text), fields(chat_id = %chat_id, text_len = text.len()))]
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<(), ApplicationError> {
        let sent = self
            .client
            .send_text(chat_id.as_i64(), text, reply_to)
            .await
            .map_err(|e| messenger_error("sendMessage", &e))?;

        debug!(parts = sent.len(), "Telegram text message sent");
        Ok(())
    }

    #[instrument(skip(self, audio), fields(chat_id = %chat_id, audio_size = audio.len()))]
    async fn send_audio(
        &self,
        chat_id: ChatId,
        audio: AudioBlob,
        reply_to: Option<i64>,
    ) -> Result<(), ApplicationError> {
        let upload = AudioUpload {
            data: audio.data,
            filename: &audio.filename,
            mime_type: &audio.mime_type,
            title: audio.title.as_deref(),
        };

        let message = self
            .client
            .send_audio(chat_id.as_i64(), upload, reply_to)
            .await
            .map_err(|e| messenger_error("sendAudio", &e))?;

        debug!(message_id = message.message_id, "Telegram audio message sent");
        Ok(())
    }

    async fn send_chat_action(
        &self,
        chat_id: ChatId,
        action: ChatAction,
    ) -> Result<(), ApplicationError> {
        self.client
            .send_chat_action(chat_id.as_i64(), action.as_str())
            .await
            .map_err(|e| messenger_error("sendChatAction", &e))?;
        Ok(())
    }

    /// Confirms the token with `getMe` before pointing Telegram at `url`.
    async fn register_webhook(
        &self,
        url: &str,
        secret_token: &str,
    ) -> Result<(), ApplicationError> {
        let bot = self
            .client
            .get_me()
            .await
            .map_err(|e| messenger_error("getMe", &e))?;
        info!(bot_id = bot.id, username = ?bot.username, "Bot token verified");

        self.client
            .set_webhook(url, secret_token)
            .await
            .map_err(|e| messenger_error("setWebhook", &e))?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ApplicationError> {
        if self.delete_webhook_on_shutdown {
            self.client
                .delete_webhook()
                .await
                .map_err(|e| messenger_error("deleteWebhook", &e))?;
            info!("Webhook deleted");
        }
        info!("Telegram client released");
        Ok(())
    }
}
