//! Bot commands - Slash commands answered without consulting a provider

use serde::{Deserialize, Serialize};

/// Commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotCommand {
    /// Greeting and introduction
    Start,
    /// Usage tips
    Help,
    /// Show active provider order and models
    Mode,
}

impl BotCommand {
    /// Whether the text is addressed to the command layer at all
    ///
    /// Telegram marks a command only when the message opens with `/` directly
    /// followed by a letter, digit or underscore. Such text never reaches a
    /// provider, known command or not; "/", "/ kya hai" and " /start" do.
    pub fn is_command(text: &str) -> bool {
        text.strip_prefix('/')
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Parse a known command
    ///
    /// Accepts `/start`, `/start@BotName` and trailing arguments. Returns `None`
    /// for plain text and for unknown commands.
    pub fn parse(text: &str) -> Option<Self> {
        if !Self::is_command(text) {
            return None;
        }
        let word = text.strip_prefix('/')?.split_whitespace().next()?;
        let name = word.split('@').next().unwrap_or(word);

        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "mode" => Some(Self::Mode),
            _ => None,
        }
    }

    /// Command name without the slash
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Mode => "mode",
        }
    }
}
