//! The lookup contract every dictionary backend implements.

use crate::error::SourceError;
use crate::types::DefinitionResult;
use async_trait::async_trait;

/// A dictionary data provider.
#[async_trait]
pub trait Source: Send + Sync {
    /// Backend name, used in logs.
    fn name(&self) -> &str;

    /// Look up a single, non-empty word.
    async fn define(&self, word: &str) -> Result<DefinitionResult, SourceError>;
}
