//! Telegram integration
//!
//! Handles Telegram Bot API webhooks and message sending.

pub mod client;
pub mod webhook;

pub use client::{
    AudioUpload, MAX_MESSAGE_CHARS, TelegramClient, TelegramClientConfig, TelegramError,
    split_message,
};
pub use webhook::{
    Chat, Message, SECRET_TOKEN_HEADER, TextMessage, Update, User, extract_text_message,
    verify_secret_token,
};
