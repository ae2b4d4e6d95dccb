//! Telegram client for sending messages
//!
//! Uses the Bot API over HTTPS: `{base}/bot{token}/{method}`.

use std::time::Duration;

use reqwest::{Client, multipart};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::webhook::{Message, User};

/// Maximum characters in one text message
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Telegram API errors
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {code} - {description}")]
    Api {
        code: i32,
        description: String,
        retry_after: Option<u64>,
    },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Telegram client configuration
#[derive(Clone)]
pub struct TelegramClientConfig {
    /// Bot token from @BotFather
    pub bot_token: SecretString,
    /// Bot API root (default: https://api.telegram.org)
    pub api_base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl std::fmt::Debug for TelegramClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClientConfig")
            .field("bot_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl Default for TelegramClientConfig {
    fn default() -> Self {
        Self {
            bot_token: SecretString::from(String::new()),
            api_base_url: "https://api.telegram.org".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Telegram client for the Bot API
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    config: TelegramClientConfig,
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default = "Option::default")]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i32>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ReplyParameters {
    message_id: i64,
    allow_sending_without_reply: bool,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_parameters: Option<ReplyParameters>,
}

#[derive(Debug, Serialize)]
struct SendChatActionRequest<'a> {
    chat_id: i64,
    action: &'a str,
}

#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
    secret_token: &'a str,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct DeleteWebhookRequest {
    drop_pending_updates: bool,
}

/// An audio file to upload with `sendAudio`
#[derive(Debug, Clone)]
pub struct AudioUpload<'a> {
    pub data: Vec<u8>,
    pub filename: &'a str,
    pub mime_type: &'a str,
    pub title: Option<&'a str>,
}

fn reply_to(message_id: Option<i64>) -> Option<ReplyParameters> {
    message_id.map(|message_id| ReplyParameters {
        message_id,
        allow_sending_without_reply: true,
    })
}

impl TelegramClient {
    /// Create a new Telegram client
    pub fn new(config: TelegramClientConfig) -> Result<Self, TelegramError> {
        if config.bot_token.expose_secret().trim().is_empty() {
            return Err(TelegramError::Configuration(
                "bot_token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.bot_token.expose_secret(),
            method
        )
    }

    async fn parse<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T, TelegramError> {
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            TelegramError::InvalidResponse(format!("{method} returned {status}: {e}"))
        })?;

        if envelope.ok {
            envelope.result.ok_or_else(|| {
                TelegramError::InvalidResponse(format!("{method} returned no result"))
            })
        } else {
            let error = TelegramError::Api {
                code: envelope.error_code.unwrap_or_else(|| i32::from(status.as_u16())),
                description: envelope.description.unwrap_or_default(),
                retry_after: envelope.parameters.and_then(|p| p.retry_after),
            };
            warn!(method = %method, error = %error, "Telegram API call failed");
            Err(error)
        }
    }

    async fn call<P: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &P,
    ) -> Result<T, TelegramError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await?;
        Self::parse(method, response).await
    }

    /// Fetch the bot's own account; doubles as a token check
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        let response = self.client.get(self.method_url("getMe")).send().await?;
        Self::parse("getMe", response).await
    }

    /// Send a text message
    #[instrument(skip(self, text), fields(chat_id = chat_id, text_len = text.len()))]
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<Message, TelegramError> {
        debug!("Sending Telegram message");
        self.call(
            "sendMessage",
            &SendMessageRequest {
                chat_id,
                text,
                reply_parameters: reply_to(reply_to_message_id),
            },
        )
        .await
    }

    /// Send text of any length, split into as many messages as needed
    ///
    /// Only the first part is threaded as a reply.
    pub async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<Vec<Message>, TelegramError> {
        let mut sent = Vec::new();
        for (idx, part) in split_message(text, MAX_MESSAGE_CHARS).iter().enumerate() {
            let reply = if idx == 0 { reply_to_message_id } else { None };
            sent.push(self.send_message(chat_id, part, reply).await?);
        }
        Ok(sent)
    }

    /// Show an activity indicator such as `typing`
    #[instrument(skip(self))]
    pub async fn send_chat_action(&self, chat_id: i64, action: &str) -> Result<bool, TelegramError> {
        self.call("sendChatAction", &SendChatActionRequest { chat_id, action })
            .await
    }

    /// Upload an audio file
    #[instrument(skip(self, audio), fields(chat_id = chat_id, bytes = audio.data.len()))]
    pub async fn send_audio(
        &self,
        chat_id: i64,
        audio: AudioUpload<'_>,
        reply_to_message_id: Option<i64>,
    ) -> Result<Message, TelegramError> {
        let part = multipart::Part::bytes(audio.data)
            .file_name(audio.filename.to_string())
            .mime_str(audio.mime_type)?;

        let mut form = multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("audio", part);

        if let Some(title) = audio.title {
            form = form.text("title", title.to_string());
        }
        if let Some(reply) = reply_to(reply_to_message_id) {
            let json = serde_json::to_string(&reply)
                .map_err(|e| TelegramError::InvalidResponse(e.to_string()))?;
            form = form.text("reply_parameters", json);
        }

        debug!("Uploading audio");
        let response = self
            .client
            .post(self.method_url("sendAudio"))
            .multipart(form)
            .send()
            .await?;
        Self::parse("sendAudio", response).await
    }

    /// Register the webhook URL and its secret token
    #[instrument(skip(self, secret_token))]
    pub async fn set_webhook(&self, url: &str, secret_token: &str) -> Result<bool, TelegramError> {
        let ok = self
            .call(
                "setWebhook",
                &SetWebhookRequest {
                    url,
                    secret_token,
                    allowed_updates: &["message"],
                },
            )
            .await?;
        info!(url = %url, "Webhook registered");
        Ok(ok)
    }

    /// Remove the webhook registration
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self) -> Result<bool, TelegramError> {
        self.call(
            "deleteWebhook",
            &DeleteWebhookRequest {
                drop_pending_updates: false,
            },
        )
        .await
    }
}

/// Split text into parts of at most `max_chars` characters
///
/// Prefers to break after a newline, then after a space, counting characters
/// rather than bytes.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut parts = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(idx, _)| idx);
        let window = &rest[..limit];
        let cut = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .filter(|&idx| idx > 0)
            .map_or(limit, |idx| idx + 1);

        let part = rest[..cut].trim_end();
        if !part.is_empty() {
            parts.push(part.to_string());
        }
        rest = &rest[cut..];
    }

    // Telegram rejects blank messages
    if !rest.trim().is_empty() || parts.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}
