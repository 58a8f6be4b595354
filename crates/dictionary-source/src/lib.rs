//! Dictionary lookup contract, result model and HTTP backends.

mod error;
mod free_dictionary;
mod http;
mod oxford;
mod source;
mod types;

pub use error::SourceError;
pub use free_dictionary::FreeDictionarySource;
pub use oxford::OxfordSource;
pub use source::Source;
pub use types::*;

/// Default endpoints for the bundled backends.
pub mod defaults {
    pub use crate::free_dictionary::DEFAULT_BASE_URL as FREE_DICTIONARY_BASE_URL;
    pub use crate::oxford::DEFAULT_BASE_URL as OXFORD_BASE_URL;
}
