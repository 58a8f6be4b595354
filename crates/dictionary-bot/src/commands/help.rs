//! Help command - lists available commands.

use crate::commands::{CommandHandler, CommandOutcome};
use crate::error::AppResult;
use async_trait::async_trait;
use matrix_client::BotMessage;

pub struct HelpHandler {
    trigger: String,
    lines: Vec<String>,
}

impl HelpHandler {
    /// `lines` are the help lines of the other registered commands.
    pub fn new(prefix: &str, lines: Vec<String>) -> Self {
        Self {
            trigger: format!("{}help", prefix),
            lines,
        }
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn trigger(&self) -> Option<&str> {
        Some(self.trigger.as_str())
    }

    fn help_line(&self) -> Option<String> {
        Some(format!("{} - Show this message", self.trigger))
    }

    async fn execute(&self, _message: &BotMessage) -> AppResult<CommandOutcome> {
        let mut text = String::from("**Commands:**\n");
        for line in self.lines.iter().cloned().chain(self.help_line()) {
            text.push_str(&format!("- {}\n", line));
        }
        Ok(CommandOutcome::Reply(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_message;

    #[tokio::test]
    async fn test_help_lists_commands() {
        let handler = HelpHandler::new(
            "!",
            vec!["!dictionary <word> - Get the dictionary definition(s) for a single word.".into()],
        );

        let outcome = handler.execute(&test_message("!help")).await.unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Reply(
                "**Commands:**\n- !dictionary <word> - Get the dictionary definition(s) for a single word.\n- !help - Show this message\n".into()
            )
        );
    }
}
