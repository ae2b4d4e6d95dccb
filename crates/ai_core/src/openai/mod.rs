//! OpenAI-compatible chat completions client
//!
//! Serves both OpenAI and Groq, which expose the same `/chat/completions` API.

mod client;

pub use client::OpenAiCompatibleEngine;
