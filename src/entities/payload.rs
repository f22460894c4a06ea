//! Creation payloads accepted at the API boundary.
//!
//! `validate` runs before anything is written; the store's own required-field
//! checks still guard every individual document.

use super::types::{DefinitionGroup, DialectEntry, WordClass};
use crate::storage::DocumentId;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A word together with the phrases and examples to create under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub word: String,
    #[serde(default)]
    pub word_class: Option<WordClass>,
    #[serde(default)]
    pub definitions: Vec<DefinitionGroup>,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub dialects: BTreeMap<String, DialectEntry>,
    /// Example sentences that belong to the word itself.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Phrase text -> phrase details, in the order they were sent.
    #[serde(default)]
    pub phrases: IndexMap<String, NewPhrase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhrase {
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// A phrase added to a word that already exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhrase {
    pub phrase: String,
    /// Id of the parent word.
    pub word: DocumentId,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

fn require(value: &str, what: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{what} must not be empty"))
    } else {
        Ok(())
    }
}

fn require_examples(examples: &[String], owner: &str) -> Result<(), String> {
    examples
        .iter()
        .try_for_each(|example| require(example, &format!("example of '{owner}'")))
}

impl NewWord {
    pub fn validate(&self) -> Result<(), String> {
        require(&self.word, "word")?;
        require_examples(&self.examples, &self.word)?;
        for (text, phrase) in &self.phrases {
            require(text, "phrase")?;
            require_examples(&phrase.examples, text)?;
        }
        Ok(())
    }

    pub fn word_class(&self) -> WordClass {
        self.word_class.unwrap_or_default()
    }
}

impl CreatePhrase {
    pub fn validate(&self) -> Result<(), String> {
        require(&self.phrase, "phrase")?;
        require(self.word.as_str(), "word")?;
        require_examples(&self.examples, &self.phrase)
    }
}
