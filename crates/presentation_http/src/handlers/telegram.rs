//! Telegram webhook handler
//!
//! Authenticates each delivery by its secret-token header, then hands the
//! text message to the message pipeline on a separate task so slow providers
//! never hold up the acknowledgement. Those tasks are tracked in the state so
//! shutdown can let them finish.

use std::sync::Arc;

use application::InboundMessage;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use domain::ChatId;
use integration_telegram::{SECRET_TOKEN_HEADER, TextMessage, Update, extract_text_message, verify_secret_token};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};

use crate::{error::ApiError, state::AppState};

fn ack() -> Json<Value> {
    Json(json!({"ok": true}))
}

/// Telegram webhook (POST)
///
/// Rejects with 401 before looking at the body when the secret header is
/// missing or wrong. Malformed bodies are logged and still acknowledged so
/// Telegram does not redeliver them.
#[instrument(skip(state, headers, body), fields(body_len = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if !verify_secret_token(provided, state.config.secret_token.expose_secret()) {
        warn!("Telegram webhook secret token verification failed");
        return Err(ApiError::Unauthorized("invalid secret token".to_string()));
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            error!(error = %e, "Failed to parse Telegram update, acknowledging anyway");
            return Ok(ack());
        },
    };

    match extract_text_message(&update) {
        Some(message) => {
            debug!(update_id = update.update_id, chat_id = message.chat_id, "Dispatching text message");
            dispatch(&state, message);
        },
        None => debug!(update_id = update.update_id, "Update has no text message, skipping"),
    }

    Ok(ack())
}

fn dispatch(state: &AppState, message: TextMessage) {
    let inbound = InboundMessage {
        chat_id: ChatId::new(message.chat_id),
        message_id: message.message_id,
        text: message.text,
        sender: message.sender,
    };

    let handler = Arc::clone(&state.message_handler);
    state.tasks.spawn(async move {
        let chat_id = inbound.chat_id;
        match handler.handle(inbound).await {
            Ok(outcome) => info!(chat_id = %chat_id, outcome = ?outcome, "Message handled"),
            Err(e) => error!(chat_id = %chat_id, error = %e, "Failed to reply to message"),
        }
    });
}
