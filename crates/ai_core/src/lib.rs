//! AI Core - Text-generation clients
//!
//! HTTP clients for the hosted chat backends the relay falls back between:
//! OpenAI-compatible chat completions (OpenAI, Groq) and Google Gemini.

pub mod config;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod ports;

pub use config::ProviderClientConfig;
pub use error::InferenceError;
pub use gemini::GeminiEngine;
pub use openai::OpenAiCompatibleEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
