//! Hindi Jarvis HTTP presentation layer
//!
//! Serves the Telegram webhook and the liveness probe.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
