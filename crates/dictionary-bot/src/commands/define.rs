//! Dictionary command - looks up a single word.

use crate::commands::{arguments, CommandHandler, CommandOutcome};
use crate::error::AppResult;
use crate::format::format_definition;
use async_trait::async_trait;
use dictionary_source::{Source, SourceError};
use matrix_client::BotMessage;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

pub const DESCRIPTION: &str = "Get the dictionary definition(s) for a single word.";

/// ASCII word characters only: `[0-9A-Za-z_]+`.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?-u:\w)+$").unwrap());

pub struct DefineHandler {
    source: Arc<dyn Source>,
    trigger: String,
}

impl DefineHandler {
    pub fn new(prefix: &str, source: Arc<dyn Source>) -> Self {
        Self {
            source,
            trigger: format!("{}dictionary", prefix),
        }
    }
}

#[async_trait]
impl CommandHandler for DefineHandler {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn trigger(&self) -> Option<&str> {
        Some(self.trigger.as_str())
    }

    fn help_line(&self) -> Option<String> {
        Some(format!("{} <word> - {}", self.trigger, DESCRIPTION))
    }

    async fn execute(&self, message: &BotMessage) -> AppResult<CommandOutcome> {
        let word = arguments(&self.trigger, message);
        // Anything but a single word is not ours; another handler may take it.
        if word.is_empty() || !WORD_PATTERN.is_match(word) {
            return Ok(CommandOutcome::Continue);
        }

        debug!(
            "Fetching definition of {} from {} for {}",
            word,
            self.source.name(),
            message.sender
        );

        let reply = match self.source.define(word).await {
            Ok(result) => {
                debug!(
                    "{}",
                    serde_json::to_string_pretty(&result).unwrap_or_default()
                );
                format_definition(&result)
            }
            Err(SourceError::NotFound { word }) => {
                format!("No definitions found for {} :(", word)
            }
            Err(SourceError::Other(reason)) => {
                format!("Failed to get definition: {}", reason)
            }
        };

        Ok(CommandOutcome::Reply(reply))
    }
}
