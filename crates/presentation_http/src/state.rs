//! Application state shared across handlers

use std::{sync::Arc, time::Duration};

use application::MessageHandler;
use infrastructure::AppConfig;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline each verified text message is handed to
    pub message_handler: Arc<MessageHandler>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Update tasks still running after their webhook was acknowledged
    pub tasks: TaskTracker,
}

impl AppState {
    pub fn new(message_handler: Arc<MessageHandler>, config: Arc<AppConfig>) -> Self {
        Self {
            message_handler,
            config,
            tasks: TaskTracker::new(),
        }
    }

    /// Stop taking new update tasks and wait up to `grace` for running ones.
    ///
    /// Returns `false` when tasks were still running at the deadline.
    pub async fn drain_updates(&self, grace: Duration) -> bool {
        self.tasks.close();
        let pending = self.tasks.len();
        if pending > 0 {
            info!(pending, "Waiting for in-flight replies");
        }

        if tokio::time::timeout(grace, self.tasks.wait()).await.is_ok() {
            true
        } else {
            warn!(
                pending = self.tasks.len(),
                grace_secs = grace.as_secs(),
                "In-flight replies did not finish before shutdown"
            );
            false
        }
    }
}
