//! Application configuration loaded from environment variables.

use anyhow::{anyhow, Context, Result};
use dictionary_source::{defaults, FreeDictionarySource, OxfordSource, Source};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Matrix configuration
    pub matrix: MatrixConfig,

    /// Dictionary backend configuration
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixConfig {
    /// Homeserver base URL
    #[serde(default = "default_homeserver")]
    pub homeserver_url: String,

    /// Access token of the bot account
    pub access_token: String,

    /// Long-poll timeout for /sync
    #[serde(default = "default_sync_timeout", with = "humantime_serde")]
    pub sync_timeout: Duration,

    /// Join rooms on invite
    #[serde(default = "default_true")]
    pub auto_join: bool,
}

/// Which dictionary backend answers lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    FreeDictionary,
    Oxford,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Request timeout for dictionary lookups
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default)]
    pub free_dictionary: FreeDictionaryConfig,

    #[serde(default)]
    pub oxford: OxfordConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FreeDictionaryConfig {
    #[serde(default = "default_free_dictionary_url")]
    pub base_url: String,

    #[serde(default = "default_free_dictionary_language")]
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OxfordConfig {
    pub app_id: Option<String>,
    pub app_key: Option<String>,

    #[serde(default = "default_oxford_url")]
    pub base_url: String,

    #[serde(default = "default_oxford_language")]
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Prefix in front of command names
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default implementations
impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            timeout: default_timeout(),
            free_dictionary: FreeDictionaryConfig::default(),
            oxford: OxfordConfig::default(),
        }
    }
}

impl Default for FreeDictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: default_free_dictionary_url(),
            language: default_free_dictionary_language(),
        }
    }
}

impl Default for OxfordConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            base_url: default_oxford_url(),
            language: default_oxford_language(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_homeserver() -> String {
    "http://localhost:8008".into()
}

fn default_sync_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_free_dictionary_url() -> String {
    defaults::FREE_DICTIONARY_BASE_URL.into()
}

fn default_free_dictionary_language() -> String {
    "en".into()
}

fn default_oxford_url() -> String {
    defaults::OXFORD_BASE_URL.into()
}

fn default_oxford_language() -> String {
    "en-gb".into()
}

fn default_command_prefix() -> String {
    "!".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

impl DictionaryConfig {
    /// Build the configured backend.
    pub fn build_source(&self) -> Result<Arc<dyn Source>> {
        let source: Arc<dyn Source> = match self.backend {
            Backend::FreeDictionary => Arc::new(
                FreeDictionarySource::new(
                    &self.free_dictionary.base_url,
                    &self.free_dictionary.language,
                    self.timeout,
                )
                .context("Failed to create Free Dictionary client")?,
            ),
            Backend::Oxford => {
                let (Some(app_id), Some(app_key)) = (&self.oxford.app_id, &self.oxford.app_key)
                else {
                    return Err(anyhow!(
                        "Oxford backend needs DICTIONARY__OXFORD__APP_ID and DICTIONARY__OXFORD__APP_KEY"
                    ));
                };
                Arc::new(
                    OxfordSource::new(
                        app_id,
                        app_key,
                        &self.oxford.base_url,
                        &self.oxford.language,
                        self.timeout,
                    )
                    .context("Failed to create Oxford client")?,
                )
            }
        };
        Ok(source)
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default())
    }

    fn from_source(environment: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                environment
                    .separator("__")
                    // Access tokens and app keys must stay strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(config::Environment::default().source(Some(map)))
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("MATRIX__ACCESS_TOKEN", "syt_token")]).unwrap();

        assert_eq!(config.matrix.access_token, "syt_token");
        assert_eq!(config.matrix.homeserver_url, "http://localhost:8008");
        assert_eq!(config.matrix.sync_timeout, Duration::from_secs(30));
        assert!(config.matrix.auto_join);
        assert_eq!(config.dictionary.backend, Backend::FreeDictionary);
        assert_eq!(config.dictionary.timeout, Duration::from_secs(10));
        assert_eq!(config.bot.command_prefix, "!");
        assert_eq!(config.bot.log_level, "info");
    }

    #[test]
    fn test_missing_access_token() {
        assert!(load(&[]).is_err());
    }

    #[test]
    fn test_oxford_backend() {
        let config = load(&[
            ("MATRIX__ACCESS_TOKEN", "t"),
            ("DICTIONARY__BACKEND", "oxford"),
            ("DICTIONARY__TIMEOUT", "3s"),
            ("DICTIONARY__OXFORD__APP_ID", "12a3b4c6"),
            ("DICTIONARY__OXFORD__APP_KEY", "0123456789"),
        ])
        .unwrap();

        assert_eq!(config.dictionary.backend, Backend::Oxford);
        assert_eq!(config.dictionary.timeout, Duration::from_secs(3));
        assert_eq!(config.dictionary.oxford.app_key.as_deref(), Some("0123456789"));

        let source = config.dictionary.build_source().unwrap();
        assert_eq!(source.name(), "Oxford Dictionaries");
    }

    #[test]
    fn test_oxford_without_keys_fails() {
        let config = load(&[
            ("MATRIX__ACCESS_TOKEN", "t"),
            ("DICTIONARY__BACKEND", "oxford"),
        ])
        .unwrap();

        assert!(config.dictionary.build_source().is_err());
    }

    #[test]
    fn test_default_backend_builds() {
        let source = DictionaryConfig::default().build_source().unwrap();
        assert_eq!(source.name(), "Free Dictionary API");
    }
}
