//! Domain entities

mod answer;
mod audio_blob;
mod prompt;

pub use answer::{APOLOGY_TEXT, AnswerResult, AnswerSource};
pub use audio_blob::AudioBlob;
pub use prompt::{DEFAULT_SYSTEM_PROMPT, Prompt, SystemPrompt};
