//! Bot command handlers.

mod define;
mod help;

pub use define::DefineHandler;
pub use help::HelpHandler;

use crate::error::AppResult;
use async_trait::async_trait;
use matrix_client::BotMessage;
use tracing::debug;

/// What a handler did with a message it matched.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Send this text back to the originating room.
    Reply(String),
    /// Not handled; let the next matching handler try.
    Continue,
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name (e.g., "help", "dictionary").
    fn name(&self) -> &str;

    /// Command trigger (e.g., "!help").
    fn trigger(&self) -> Option<&str> {
        None
    }

    /// One line for the help listing.
    fn help_line(&self) -> Option<String> {
        None
    }

    /// Check if this handler matches the message. The trigger must be a
    /// whole word: "!dictionary cat" matches, "!dictionarycat" does not.
    fn matches(&self, message: &BotMessage) -> bool {
        match self.trigger() {
            Some(trigger) => message
                .text
                .strip_prefix(trigger)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace)),
            None => false,
        }
    }

    /// Execute the command.
    async fn execute(&self, message: &BotMessage) -> AppResult<CommandOutcome>;
}

/// Text following the trigger, trimmed.
pub(crate) fn arguments<'a>(trigger: &str, message: &'a BotMessage) -> &'a str {
    message
        .text
        .strip_prefix(trigger)
        .map(str::trim)
        .unwrap_or_default()
}

/// Offer a message to every matching handler in order and return the first
/// reply. `None` means every matching handler declined.
pub async fn dispatch(
    handlers: &[Box<dyn CommandHandler>],
    message: &BotMessage,
) -> AppResult<Option<String>> {
    for handler in handlers.iter().filter(|h| h.matches(message)) {
        match handler.execute(message).await? {
            CommandOutcome::Reply(reply) => return Ok(Some(reply)),
            CommandOutcome::Continue => {
                debug!("{} passed on message from {}", handler.name(), message.sender);
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
pub(crate) fn test_message(text: &str) -> BotMessage {
    BotMessage {
        room_id: "!room:example.org".into(),
        event_id: "$event".into(),
        sender: "@alice:example.org".into(),
        text: text.into(),
        timestamp: 0,
    }
}
