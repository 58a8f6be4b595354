//! Lookup result model shared by every backend.

use serde::{Deserialize, Serialize};

/// Outcome of a successful dictionary lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefinitionResult {
    /// Canonical form of the looked-up word.
    pub headword: String,
    /// Part-of-speech groupings, in the order the backend returned them.
    pub entries: Vec<Entry>,
}

/// One part-of-speech grouping of senses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Free-form label such as "noun" or "verb".
    pub category: String,
    pub senses: Vec<Sense>,
}

/// One meaning of a word, possibly with nested sub-meanings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Sense {
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
    pub subsenses: Vec<Sense>,
}

impl DefinitionResult {
    pub fn new(headword: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            headword: headword.into(),
            entries,
        }
    }
}

impl Entry {
    pub fn new(category: impl Into<String>, senses: Vec<Sense>) -> Self {
        Self {
            category: category.into(),
            senses,
        }
    }
}

impl Sense {
    /// Sense with a single definition and nothing else.
    pub fn defined(definition: impl Into<String>) -> Self {
        Self {
            definitions: vec![definition.into()],
            ..Self::default()
        }
    }

    /// Append a usage example.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Append a nested sense.
    pub fn with_subsense(mut self, subsense: Sense) -> Self {
        self.subsenses.push(subsense);
        self
    }
}
