//! Replies to slash commands

use domain::{BotCommand, ProviderModels, ProviderOrder};

const START_TEXT: &str = "Namaste! Main aapka Hindi Jarvis hoon 🤖\n\
Kuch bhi poochhiye, main Hindi me text + audio reply dunga.\n\
Commands: /help /mode";

const HELP_TEXT: &str = "Bas apna sawaal bhejiye. Main Hindi me seedha jawab dunga.\n\
Tips:\n\
• Lambi query ko ek message me bhejein\n\
• Dates/numbers clear likhein\n\
Mode: pehle Groq/Gemini try, phir OpenAI (agar key di hai).";

/// Builds the fixed command replies
#[derive(Debug, Clone)]
pub struct CommandService {
    order: ProviderOrder,
    models: ProviderModels,
}

impl CommandService {
    /// Create a command service describing the active configuration
    pub const fn new(order: ProviderOrder, models: ProviderModels) -> Self {
        Self { order, models }
    }

    /// Reply text for a command
    pub fn respond(&self, command: BotCommand) -> String {
        match command {
            BotCommand::Start => START_TEXT.to_string(),
            BotCommand::Help => HELP_TEXT.to_string(),
            BotCommand::Mode => format!(
                "Provider order: {}\nModels: {}",
                self.order, self.models
            ),
        }
    }
}
