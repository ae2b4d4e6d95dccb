//! Liveness handlers

use axum::http::Uri;

use crate::error::ApiError;

/// Body returned by the liveness probe
pub const LIVENESS_TEXT: &str = "Hindi Jarvis bot is live.";

/// Liveness check - is the server running?
pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
