use super::types::{DictionaryEntries, DictionaryTerm};
use crate::search::pattern::SearchPattern;

/// The Igbo-English dictionary compiled into the binary.
const EMBEDDED_JSON: &str = include_str!("../../data/ig-en.json");

/// Read-only dictionary keyed by headword.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: DictionaryEntries,
}

impl Dictionary {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    pub fn embedded() -> serde_json::Result<Self> {
        let dictionary = Self::from_json(EMBEDDED_JSON)?;
        tracing::debug!(
            "Loaded embedded dictionary: {} headwords, {} terms",
            dictionary.len(),
            dictionary.term_count()
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[DictionaryTerm])> {
        self.entries
            .iter()
            .map(|(headword, terms)| (headword.as_str(), terms.as_slice()))
    }

    /// Entries whose headword or a term's variation matches `pattern`; when
    /// none do, entries with a matching definition instead.
    pub fn find_search_word(&self, pattern: &SearchPattern) -> DictionaryEntries {
        let igbo = self.filter(|headword, term| {
            pattern.is_match(headword) || pattern.matches_any(&term.variations)
        });
        if !igbo.is_empty() {
            return igbo;
        }

        self.filter(|_, term| pattern.matches_any(&term.definitions))
    }

    fn filter<F>(&self, predicate: F) -> DictionaryEntries
    where
        F: Fn(&str, &DictionaryTerm) -> bool,
    {
        self.entries
            .iter()
            .filter(|(headword, terms)| {
                terms
                    .iter()
                    .any(|term| predicate(headword.as_str(), term))
            })
            .map(|(headword, terms)| (headword.clone(), terms.clone()))
            .collect()
    }
}
