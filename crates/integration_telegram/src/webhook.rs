//! Telegram webhook payloads
//!
//! Receives and validates updates pushed by the Bot API.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Header carrying the secret registered with `setWebhook`
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Incoming update; only the fields the bot reads are modelled
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub edited_message: Option<Message>,
    #[serde(default)]
    pub channel_post: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub date: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub chat_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// A plain text message addressed to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    pub sender: Option<String>,
}

/// Compare the webhook secret header against the configured secret
///
/// Missing headers never match. The comparison runs in constant time.
pub fn verify_secret_token(provided: Option<&str>, expected: &str) -> bool {
    let Some(provided) = provided else {
        warn!("Missing webhook secret token header");
        return false;
    };

    bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
}

/// Extract the text message from an update
///
/// Edited messages, channel posts, messages from bots and non-text messages
/// are skipped.
pub fn extract_text_message(update: &Update) -> Option<TextMessage> {
    let message = update.message.as_ref()?;
    let text = message.text.as_ref()?;

    if message.from.as_ref().is_some_and(|u| u.is_bot) {
        return None;
    }

    Some(TextMessage {
        chat_id: message.chat.id,
        message_id: message.message_id,
        text: text.clone(),
        sender: message.from.as_ref().map(|u| {
            u.username
                .clone()
                .unwrap_or_else(|| u.first_name.clone())
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_json(text: Option<&str>) -> serde_json::Value {
        let mut message = serde_json::json!({
            "message_id": 11,
            "date": 1_700_000_000,
            "chat": {"id": 42, "type": "private"},
            "from": {"id": 7, "is_bot": false, "first_name": "Asha", "username": "asha_k"}
        });
        if let Some(text) = text {
            message["text"] = serde_json::Value::String(text.to_string());
        }
        serde_json::json!({"update_id": 1001, "message": message})
    }

    #[test]
    fn extracts_text_message() {
        let update: Update = serde_json::from_value(update_json(Some("namaste"))).unwrap();
        let message = extract_text_message(&update).unwrap();

        assert_eq!(message.chat_id, 42);
        assert_eq!(message.message_id, 11);
        assert_eq!(message.text, "namaste");
        assert_eq!(message.sender.as_deref(), Some("asha_k"));
    }

    #[test]
    fn sender_falls_back_to_first_name() {
        let mut json = update_json(Some("hi"));
        json["message"]["from"]["username"] = serde_json::Value::Null;
        let update: Update = serde_json::from_value(json).unwrap();

        assert_eq!(
            extract_text_message(&update).unwrap().sender.as_deref(),
            Some("Asha")
        );
    }

    #[test]
    fn skips_non_text_message() {
        let update: Update = serde_json::from_value(update_json(None)).unwrap();
        assert!(extract_text_message(&update).is_none());
    }

    #[test]
    fn skips_edited_message() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 5,
            "edited_message": {"message_id": 1, "chat": {"id": 1, "type": "private"}, "text": "fixed"}
        }))
        .unwrap();
        assert!(extract_text_message(&update).is_none());
    }

    #[test]
    fn skips_messages_from_bots() {
        let mut json = update_json(Some("beep"));
        json["message"]["from"]["is_bot"] = serde_json::Value::Bool(true);
        let update: Update = serde_json::from_value(json).unwrap();
        assert!(extract_text_message(&update).is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 9,
            "my_chat_member": {"chat": {"id": 1}},
            "message": {
                "message_id": 2,
                "chat": {"id": 3, "type": "group", "title": "Family"},
                "text": "/start@JarvisBot",
                "entities": [{"type": "bot_command", "offset": 0, "length": 16}]
            }
        }))
        .unwrap();
        let message = extract_text_message(&update).unwrap();
        assert_eq!(message.text, "/start@JarvisBot");
        assert!(message.sender.is_none());
    }

    #[test]
    fn secret_token_must_match_exactly() {
        assert!(verify_secret_token(Some("s3cret"), "s3cret"));
        assert!(!verify_secret_token(Some("wrong"), "s3cret"));
        assert!(!verify_secret_token(Some("s3cret "), "s3cret"));
        assert!(!verify_secret_token(Some(""), "s3cret"));
        assert!(!verify_secret_token(None, "s3cret"));
    }
}
