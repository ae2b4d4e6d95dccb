//! Application configuration
//!
//! Every key maps to one environment variable (`TELEGRAM_BOT_TOKEN`,
//! `GROQ_API_KEY`, `JARVIS_PROVIDER_ATTEMPTS`, ...). An optional `config.toml`
//! in the working directory provides the same keys in lowercase; the
//! environment wins.

mod error;

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use application::RetryPolicy;
use domain::{ProviderId, ProviderModels, ProviderOrder, SystemPrompt};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use error::ConfigError;

/// Secret used when `SECRET_TOKEN` is not set
pub const DEFAULT_SECRET_TOKEN: &str = "set-a-secret";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, colored output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Main application configuration
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Bot credential issued by @BotFather
    #[serde(default)]
    pub telegram_bot_token: Option<SecretString>,

    /// Shared secret Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`
    #[serde(default = "default_secret_token")]
    pub secret_token: SecretString,

    /// Route the webhook is served on
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Public base URL Telegram delivers updates to
    #[serde(default)]
    pub webapp_url: Option<String>,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub groq_api_key: Option<SecretString>,
    #[serde(default)]
    pub gemini_api_key: Option<SecretString>,
    #[serde(default)]
    pub openai_api_key: Option<SecretString>,

    #[serde(default)]
    pub groq_model: Option<String>,
    #[serde(default)]
    pub gemini_model: Option<String>,
    #[serde(default)]
    pub openai_model: Option<String>,

    /// Explicit provider order such as `gemini,groq`; derived from keys when unset
    #[serde(default, rename = "jarvis_provider_order")]
    pub provider_order: Option<String>,

    /// Attempts per provider
    #[serde(default = "default_provider_attempts", rename = "jarvis_provider_attempts")]
    pub provider_attempts: u32,

    /// Linear backoff step between attempts
    #[serde(default = "default_backoff_step_ms", rename = "jarvis_backoff_step_ms")]
    pub backoff_step_ms: u64,

    /// Upper bound for the whole fallback sequence
    #[serde(default, rename = "jarvis_answer_deadline_secs")]
    pub answer_deadline_secs: Option<u64>,

    /// Per-request HTTP timeout for provider calls
    #[serde(
        default = "default_provider_timeout_secs",
        rename = "jarvis_provider_timeout_secs"
    )]
    pub provider_timeout_secs: u64,

    /// Spoken language for voice replies
    #[serde(default = "default_tts_lang", rename = "jarvis_tts_lang")]
    pub tts_lang: String,

    /// Personality override for the system prompt
    #[serde(default, rename = "jarvis_system_prompt")]
    pub system_prompt: Option<String>,

    #[serde(default, rename = "jarvis_log_format")]
    pub log_format: LogFormat,

    /// Remove the webhook registration when the server stops
    #[serde(default, rename = "jarvis_delete_webhook_on_shutdown")]
    pub delete_webhook_on_shutdown: bool,
}

fn default_secret_token() -> SecretString {
    SecretString::from(DEFAULT_SECRET_TOKEN)
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_provider_attempts() -> u32 {
    3
}

const fn default_backoff_step_ms() -> u64 {
    700
}

const fn default_provider_timeout_secs() -> u64 {
    60
}

fn default_tts_lang() -> String {
    "hi".to_string()
}

fn present(secret: Option<&SecretString>) -> Option<&SecretString> {
    secret.filter(|s| !s.expose_secret().trim().is_empty())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            secret_token: default_secret_token(),
            webhook_path: default_webhook_path(),
            webapp_url: None,
            host: default_host(),
            port: default_port(),
            groq_api_key: None,
            gemini_api_key: None,
            openai_api_key: None,
            groq_model: None,
            gemini_model: None,
            openai_model: None,
            provider_order: None,
            provider_attempts: default_provider_attempts(),
            backoff_step_ms: default_backoff_step_ms(),
            answer_deadline_secs: None,
            provider_timeout_secs: default_provider_timeout_secs(),
            tts_lang: default_tts_lang(),
            system_prompt: None,
            log_format: LogFormat::default(),
            delete_webhook_on_shutdown: false,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: Option<&SecretString>| present(s).map(|_| "[REDACTED]");
        f.debug_struct("AppConfig")
            .field("telegram_bot_token", &redact(self.telegram_bot_token.as_ref()))
            .field("secret_token", &"[REDACTED]")
            .field("webhook_path", &self.webhook_path)
            .field("webapp_url", &self.webapp_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("groq_api_key", &redact(self.groq_api_key.as_ref()))
            .field("gemini_api_key", &redact(self.gemini_api_key.as_ref()))
            .field("openai_api_key", &redact(self.openai_api_key.as_ref()))
            .field("models", &self.models())
            .field("provider_attempts", &self.provider_attempts)
            .field("backoff_step_ms", &self.backoff_step_ms)
            .field("answer_deadline_secs", &self.answer_deadline_secs)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("tts_lang", &self.tts_lang)
            .field("log_format", &self.log_format)
            .field("delete_webhook_on_shutdown", &self.delete_webhook_on_shutdown)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Load configuration from the process environment and optional file
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration with an explicit environment map
    ///
    /// `None` reads the process environment.
    pub fn load_from(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .set_default("secret_token", DEFAULT_SECRET_TOKEN)?
            .set_default("webhook_path", "/webhook")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Unprefixed variables, e.g. TELEGRAM_BOT_TOKEN, PORT
            .add_source(
                config::Environment::default()
                    .try_parsing(true)
                    .source(env),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Check the values required to start serving
    pub fn validate(&self) -> Result<(), ConfigError> {
        if present(self.telegram_bot_token.as_ref()).is_none() {
            return Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"));
        }

        let url = self
            .webapp_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing("WEBAPP_URL"))?;
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ConfigError::Invalid(format!(
                "WEBAPP_URL must be an http(s) URL, got '{url}'"
            )));
        }

        if !self.webhook_path.starts_with('/') || self.webhook_path == "/" {
            return Err(ConfigError::Invalid(format!(
                "WEBHOOK_PATH must be an absolute path other than '/', got '{}'",
                self.webhook_path
            )));
        }

        if self.secret_token.expose_secret().is_empty() {
            return Err(ConfigError::Missing("SECRET_TOKEN"));
        }

        if self.provider_attempts == 0 {
            return Err(ConfigError::Invalid(
                "JARVIS_PROVIDER_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        if self.answer_deadline_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "JARVIS_ANSWER_DEADLINE_SECS must be greater than 0".to_string(),
            ));
        }

        self.provider_order()?;

        if self.secret_token.expose_secret() == DEFAULT_SECRET_TOKEN {
            warn!("SECRET_TOKEN is the built-in default; set a private value");
        }

        Ok(())
    }

    /// API key for a provider, if configured and not blank
    #[must_use]
    pub fn api_key(&self, id: ProviderId) -> Option<&SecretString> {
        present(match id {
            ProviderId::Groq => self.groq_api_key.as_ref(),
            ProviderId::Gemini => self.gemini_api_key.as_ref(),
            ProviderId::OpenAi => self.openai_api_key.as_ref(),
        })
    }

    /// Providers to try, in order
    ///
    /// Uses `JARVIS_PROVIDER_ORDER` when set, otherwise every provider with a
    /// key in groq, gemini, openai order. Providers without a key are dropped
    /// from an explicit order; if none remain the key-derived order applies.
    pub fn provider_order(&self) -> Result<ProviderOrder, ConfigError> {
        let derived = || ProviderOrder::from_available(|id| self.api_key(id).is_some());
        match self.provider_order.as_deref().map(str::trim) {
            Some(order) if !order.is_empty() => {
                let requested = ProviderOrder::parse(order)
                    .map_err(|e| ConfigError::Invalid(format!("JARVIS_PROVIDER_ORDER: {e}")))?;
                let keyed: Vec<ProviderId> = requested
                    .iter()
                    .filter(|id| self.api_key(*id).is_some())
                    .collect();
                if keyed.len() < requested.len() {
                    warn!(
                        requested = %order,
                        "JARVIS_PROVIDER_ORDER names providers without an API key; skipping them"
                    );
                }
                Ok(ProviderOrder::new(keyed).unwrap_or_else(|_| derived()))
            }
            _ => Ok(derived()),
        }
    }

    /// Model names with overrides applied
    #[must_use]
    pub fn models(&self) -> ProviderModels {
        let mut models = ProviderModels::default();
        for (id, model) in [
            (ProviderId::Groq, &self.groq_model),
            (ProviderId::Gemini, &self.gemini_model),
            (ProviderId::OpenAi, &self.openai_model),
        ] {
            if let Some(model) = model {
                models = models.with_model(id, model.as_str());
            }
        }
        models
    }

    /// Retry policy applied around each provider call
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::linear(self.provider_attempts, self.backoff_step_ms)
    }

    /// Overall deadline for one answer
    #[must_use]
    pub fn answer_deadline(&self) -> Option<Duration> {
        self.answer_deadline_secs.map(Duration::from_secs)
    }

    /// Per-request provider timeout in milliseconds
    #[must_use]
    pub const fn provider_timeout_ms(&self) -> u64 {
        self.provider_timeout_secs.saturating_mul(1000)
    }

    /// System prompt with the personality override applied
    #[must_use]
    pub fn system_prompt(&self) -> SystemPrompt {
        self.system_prompt
            .as_deref()
            .map_or_else(SystemPrompt::default, SystemPrompt::new)
    }

    /// Full webhook URL registered with Telegram
    #[must_use]
    pub fn webhook_url(&self) -> Option<String> {
        self.webapp_url
            .as_deref()
            .map(|base| format!("{}{}", base.trim().trim_end_matches('/'), self.webhook_path))
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
