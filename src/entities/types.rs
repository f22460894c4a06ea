//! Dictionary Entity Types
//!
//! The three stored document kinds and the closed vocabularies they use.
//! Words and phrases refer to their children by id; the `Populated*` views are
//! what the API returns once those ids are resolved.

use crate::storage::{Document, DocumentId};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Part-of-speech codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum WordClass {
    Adj,
    Adv,
    /// Active verb.
    Av,
    /// Medial verb.
    Mv,
    /// Pronominal verb.
    Pv,
    Aux,
    Cjn,
    Dem,
    /// Inflectional suffix.
    Isuf,
    /// Extensional suffix.
    Esuf,
    Intj,
    /// Common noun.
    #[default]
    Nnc,
    /// Proper noun.
    Nnp,
    Num,
    Prep,
    Prn,
    Qtf,
}

/// Dialect codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Dialect {
    /// Standard Igbo.
    Nsa,
    /// Abiriba.
    Abi,
    /// Anambra.
    Ani,
    /// Afikpo.
    Afi,
    /// Mbaise.
    Mba,
    /// Nkanu.
    Nka,
    /// Onitsha.
    Oni,
    /// Owerri.
    Owe,
    /// Umuahia.
    Umu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionGroup {
    #[serde(default)]
    pub word_class: WordClass,
    #[serde(default)]
    pub definitions: Vec<String>,
}

/// How one dialect spells and pronounces a word.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialectEntry {
    #[serde(default)]
    pub dialects: Vec<Dialect>,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub pronunciation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: DocumentId,
    pub word: String,
    pub word_class: WordClass,
    pub definitions: Vec<DefinitionGroup>,
    pub variations: Vec<String>,
    pub dialects: BTreeMap<String, DialectEntry>,
    pub phrases: Vec<DocumentId>,
    pub examples: Vec<DocumentId>,
}

impl Word {
    /// Every definition string across all definition groups.
    pub fn all_definitions(&self) -> impl Iterator<Item = &str> {
        self.definitions
            .iter()
            .flat_map(|group| group.definitions.iter().map(String::as_str))
    }
}

impl Document for Word {
    const COLLECTION: &'static str = "words";

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.word.trim().is_empty() {
            return Err("word is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    pub id: DocumentId,
    pub phrase: String,
    pub parent_word: DocumentId,
    pub definitions: Vec<String>,
    pub examples: Vec<DocumentId>,
}

impl Document for Phrase {
    const COLLECTION: &'static str = "phrases";

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.phrase.trim().is_empty() {
            return Err("phrase is required".to_string());
        }
        if self.parent_word.as_str().is_empty() {
            return Err("parentWord is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub id: DocumentId,
    pub example: String,
    pub parent_word: DocumentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_phrase: Option<DocumentId>,
}

impl Document for Example {
    const COLLECTION: &'static str = "examples";

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.example.trim().is_empty() {
            return Err("example is required".to_string());
        }
        if self.parent_word.as_str().is_empty() {
            return Err("parentWord is required".to_string());
        }
        Ok(())
    }
}

/// A phrase with its examples resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedPhrase {
    pub id: DocumentId,
    pub phrase: String,
    pub parent_word: DocumentId,
    pub definitions: Vec<String>,
    pub examples: Vec<Example>,
}

impl PopulatedPhrase {
    pub fn new(phrase: Phrase, examples: Vec<Example>) -> Self {
        Self {
            id: phrase.id,
            phrase: phrase.phrase,
            parent_word: phrase.parent_word,
            definitions: phrase.definitions,
            examples,
        }
    }
}

/// A word with its phrases (and their examples) resolved. The word's own
/// examples stay as ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedWord {
    pub id: DocumentId,
    pub word: String,
    pub word_class: WordClass,
    pub definitions: Vec<DefinitionGroup>,
    pub variations: Vec<String>,
    pub dialects: BTreeMap<String, DialectEntry>,
    pub phrases: Vec<PopulatedPhrase>,
    pub examples: Vec<DocumentId>,
}

impl PopulatedWord {
    pub fn new(word: Word, phrases: Vec<PopulatedPhrase>) -> Self {
        Self {
            id: word.id,
            word: word.word,
            word_class: word.word_class,
            definitions: word.definitions,
            variations: word.variations,
            dialects: word.dialects,
            phrases,
            examples: word.examples,
        }
    }
}
