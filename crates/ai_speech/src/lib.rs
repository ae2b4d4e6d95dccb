//! AI Speech - Text-to-Speech abstractions
//!
//! Provides the `TextToSpeech` port and a Google Translate TTS provider that
//! speaks the bot's replies in a fixed language (Hindi by default).
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GoogleTranslateTts, SpeechConfig, TextToSpeech};
//!
//! let tts = GoogleTranslateTts::new(SpeechConfig::default())?;
//! let audio = tts.synthesize("नमस्ते", None).await?;
//! ```

pub mod chunking;
pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::google_translate::GoogleTranslateTts;
pub use types::{AudioData, AudioFormat};
