//! Backend for the Oxford Dictionaries API.

use crate::error::SourceError;
use crate::http::handle_response;
use crate::source::Source;
use crate::types::{DefinitionResult, Entry, Sense};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;
use urlencoding::encode;

pub const DEFAULT_BASE_URL: &str = "https://od-api.oxforddictionaries.com/api/v2";

/// Oxford Dictionaries API client.
///
/// The application key is stored using `SecretString` so it never shows up
/// in debug output.
#[derive(Clone)]
pub struct OxfordSource {
    client: Client,
    base_url: String,
    language: String,
    app_id: String,
    app_key: SecretString,
}

#[derive(Deserialize)]
struct EntriesResponse {
    #[serde(default)]
    results: Vec<HeadwordEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeadwordEntry {
    word: String,
    #[serde(default)]
    lexical_entries: Vec<LexicalEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LexicalEntry {
    lexical_category: LexicalCategory,
    #[serde(default)]
    entries: Vec<OxfordEntry>,
}

#[derive(Deserialize)]
struct LexicalCategory {
    text: String,
}

#[derive(Deserialize)]
struct OxfordEntry {
    #[serde(default)]
    senses: Vec<OxfordSense>,
}

#[derive(Deserialize)]
struct OxfordSense {
    #[serde(default)]
    definitions: Vec<String>,
    #[serde(default)]
    examples: Vec<Example>,
    #[serde(default)]
    subsenses: Vec<OxfordSense>,
}

#[derive(Deserialize)]
struct Example {
    text: String,
}

impl From<OxfordSense> for Sense {
    fn from(sense: OxfordSense) -> Self {
        Self {
            definitions: sense.definitions,
            examples: sense.examples.into_iter().map(|e| e.text).collect(),
            subsenses: sense.subsenses.into_iter().map(Sense::from).collect(),
        }
    }
}

impl OxfordSource {
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        base_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            language: language.into(),
            app_id: app_id.into(),
            app_key: SecretString::new(app_key.into()),
        })
    }

    fn into_result(word: &str, response: EntriesResponse) -> Result<DefinitionResult, SourceError> {
        let headword = match response.results.first() {
            Some(result) => result.word.clone(),
            None => return Err(SourceError::not_found(word)),
        };

        let entries = response
            .results
            .into_iter()
            .flat_map(|result| result.lexical_entries)
            .map(|lexical| {
                let senses = lexical
                    .entries
                    .into_iter()
                    .flat_map(|entry| entry.senses)
                    .map(Sense::from)
                    .collect();
                Entry::new(lexical.lexical_category.text, senses)
            })
            .collect();

        Ok(DefinitionResult::new(headword, entries))
    }
}

#[async_trait]
impl Source for OxfordSource {
    fn name(&self) -> &str {
        "Oxford Dictionaries"
    }

    #[instrument(skip(self))]
    async fn define(&self, word: &str) -> Result<DefinitionResult, SourceError> {
        let word_id = word.to_lowercase();
        let response = self
            .client
            .get(format!(
                "{}/entries/{}/{}",
                self.base_url,
                self.language,
                encode(&word_id)
            ))
            .header("app_id", &self.app_id)
            .header("app_key", self.app_key.expose_secret())
            .send()
            .await?;

        let entries: EntriesResponse = handle_response(response, word).await?;
        Self::into_result(word, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_source(mock_server: &MockServer) -> OxfordSource {
        OxfordSource::new(
            "test-app-id",
            "test-app-key",
            mock_server.uri(),
            "en-gb",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_define_success() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!({
            "id": "run",
            "results": [{
                "id": "run",
                "language": "en-gb",
                "word": "run",
                "lexicalEntries": [
                    {
                        "lexicalCategory": { "id": "verb", "text": "Verb" },
                        "entries": [{
                            "senses": [{
                                "definitions": ["move at a speed faster than a walk"],
                                "examples": [{ "text": "the dog ran across the road" }],
                                "subsenses": [
                                    { "definitions": ["run as a sport or for exercise"] },
                                    { "examples": [{ "text": "orphaned example" }] }
                                ]
                            }]
                        }]
                    },
                    {
                        "lexicalCategory": { "id": "noun", "text": "Noun" },
                        "entries": [
                            { "senses": [{ "definitions": ["an act or spell of running"] }] },
                            { "senses": [{ "definitions": ["a journey accomplished"] }] }
                        ]
                    }
                ]
            }]
        });

        Mock::given(method("GET"))
            .and(path("/entries/en-gb/run"))
            .and(header("app_id", "test-app-id"))
            .and(header("app_key", "test-app-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server);
        let result = source.define("Run").await.unwrap();

        assert_eq!(result.headword, "run");
        assert_eq!(result.entries.len(), 2);

        let verb = &result.entries[0];
        assert_eq!(verb.category, "Verb");
        assert_eq!(verb.senses[0].examples, vec!["the dog ran across the road".to_string()]);
        assert_eq!(verb.senses[0].subsenses.len(), 2);
        assert!(verb.senses[0].subsenses[1].definitions.is_empty());

        let noun = &result.entries[1];
        assert_eq!(noun.category, "Noun");
        assert_eq!(noun.senses.len(), 2);
        assert_eq!(noun.senses[1].definitions[0], "a journey accomplished");
    }

    #[tokio::test]
    async fn test_define_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/entries/en-gb/xyzzy"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "No entry found matching supplied source_lang, word and provided filters"
            })))
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server);
        assert_eq!(
            source.define("xyzzy").await,
            Err(SourceError::not_found("xyzzy"))
        );
    }

    #[tokio::test]
    async fn test_define_empty_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/entries/en-gb/cat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server);
        assert_eq!(source.define("cat").await, Err(SourceError::not_found("cat")));
    }

    #[tokio::test]
    async fn test_define_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/entries/en-gb/cat"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let source = create_test_source(&mock_server);
        assert_eq!(
            source.define("cat").await,
            Err(SourceError::Other("Authentication failed".into()))
        );
    }

    #[test]
    fn test_name() {
        let source = OxfordSource::new(
            "id",
            "key",
            DEFAULT_BASE_URL,
            "en-gb",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(source.name(), "Oxford Dictionaries");
    }
}
