use crate::entities::payload::NewPhrase;
use crate::entities::types::WordClass;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sense of a headword as it appears in the static dictionary file.
///
/// Unlike a stored `Word`, definitions are a flat list and the word class may
/// be missing; the seed importer fills both in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryTerm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_class: Option<WordClass>,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub phrases: IndexMap<String, NewPhrase>,
}

/// Headword -> terms, as returned by the test search route.
pub type DictionaryEntries = BTreeMap<String, Vec<DictionaryTerm>>;

/// Outcome of a completed seed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    pub headwords: usize,
    pub words_created: usize,
    pub indexed_headwords: usize,
    pub elapsed_ms: u64,
}
