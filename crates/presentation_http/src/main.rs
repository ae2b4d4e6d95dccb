//! Hindi Jarvis HTTP Server
//!
//! Main entry point: loads configuration, registers the Telegram webhook and
//! serves updates until SIGINT/SIGTERM.

use std::{sync::Arc, time::Duration};

use ai_speech::SpeechConfig;
use anyhow::Context;
use application::{CommandService, MessageHandler, MessengerPort, SpeechSynthesizerPort};
use infrastructure::{
    AppConfig, LogFormat, SpeechAdapter, TelegramMessengerAdapter, build_orchestrator,
};
use integration_telegram::TelegramClientConfig;
use presentation_http::{routes, state::AppState};
use secrecy::ExposeSecret;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "info,jarvis_server=debug,tower_http=debug";

/// Enough for one full fallback sequence at the default retry settings
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    info!("🤖 Hindi Jarvis v{} starting...", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {},
        Err(e) => warn!(error = %e, "Failed to read .env file"),
    }

    config.validate().context("Invalid configuration")?;
    info!(
        host = %config.host,
        port = config.port,
        webhook_path = %config.webhook_path,
        "Configuration loaded"
    );

    // Telegram client
    let bot_token = config
        .telegram_bot_token
        .clone()
        .context("TELEGRAM_BOT_TOKEN is required")?;
    let messenger = Arc::new(
        TelegramMessengerAdapter::new(TelegramClientConfig {
            bot_token,
            ..Default::default()
        })?
        .with_delete_webhook_on_shutdown(config.delete_webhook_on_shutdown),
    );

    // Speech and providers
    let speech = SpeechAdapter::new(SpeechConfig {
        language: config.tts_lang.clone(),
        ..Default::default()
    })?;
    let orchestrator = build_orchestrator(&config)?;
    let commands = CommandService::new(orchestrator.order().clone(), config.models());

    let message_handler = MessageHandler::new(
        Arc::new(orchestrator),
        commands,
        Arc::clone(&messenger) as Arc<dyn MessengerPort>,
        Arc::new(speech) as Arc<dyn SpeechSynthesizerPort>,
    );

    // Register the webhook before accepting traffic
    let webhook_url = config
        .webhook_url()
        .context("WEBAPP_URL is required")?;
    messenger
        .register_webhook(&webhook_url, config.secret_token.expose_secret())
        .await
        .context("Failed to register Telegram webhook")?;
    info!(url = %webhook_url, "🔗 Webhook registered");

    let addr = config.bind_addr();
    let state = AppState::new(Arc::new(message_handler), Arc::new(config));

    let app = routes::create_router(state.clone()).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.drain_updates(SHUTDOWN_GRACE).await;

    if let Err(e) = messenger.shutdown().await {
        error!(error = %e, "Failed to release Telegram client");
    }

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
