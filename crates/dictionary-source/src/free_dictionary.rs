//! Backend for the Free Dictionary API (dictionaryapi.dev, no key required).

use crate::error::SourceError;
use crate::http::handle_response;
use crate::source::Source;
use crate::types::{DefinitionResult, Entry, Sense};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;
use urlencoding::encode;

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2";

/// Free Dictionary API client.
#[derive(Clone)]
pub struct FreeDictionarySource {
    client: Client,
    base_url: String,
    language: String,
}

#[derive(Deserialize)]
struct WordItem {
    word: String,
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<MeaningDefinition>,
}

#[derive(Deserialize)]
struct MeaningDefinition {
    definition: String,
    example: Option<String>,
}

impl FreeDictionarySource {
    pub fn new(
        base_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            language: language.into(),
        })
    }

    fn into_result(word: &str, items: Vec<WordItem>) -> Result<DefinitionResult, SourceError> {
        let headword = match items.first() {
            Some(item) => item.word.clone(),
            None => return Err(SourceError::not_found(word)),
        };

        let entries: Vec<Entry> = items
            .into_iter()
            .flat_map(|item| item.meanings)
            .map(|meaning| {
                let senses = meaning
                    .definitions
                    .into_iter()
                    .map(|d| Sense {
                        definitions: vec![d.definition],
                        examples: d.example.into_iter().collect(),
                        subsenses: Vec::new(),
                    })
                    .collect();
                Entry::new(meaning.part_of_speech, senses)
            })
            .collect();

        if entries.is_empty() {
            return Err(SourceError::not_found(word));
        }

        Ok(DefinitionResult::new(headword, entries))
    }
}

#[async_trait]
impl Source for FreeDictionarySource {
    fn name(&self) -> &str {
        "Free Dictionary API"
    }

    #[instrument(skip(self))]
    async fn define(&self, word: &str) -> Result<DefinitionResult, SourceError> {
        let response = self
            .client
            .get(format!(
                "{}/entries/{}/{}",
                self.base_url,
                self.language,
                encode(word)
            ))
            .send()
            .await?;

        let items: Vec<WordItem> = handle_response(response, word).await?;
        Self::into_result(word, items)
    }
}
