//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// `GET /` also answers `HEAD /`.
pub fn create_router(state: AppState) -> Router {
    let webhook_path = state.config.webhook_path.clone();

    Router::new()
        .route("/", get(handlers::health::liveness))
        .route(&webhook_path, post(handlers::telegram::handle_webhook))
        .fallback(handlers::health::not_found)
        .with_state(state)
}
