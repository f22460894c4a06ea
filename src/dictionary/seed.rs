//! Seed Importer
//!
//! Wipes the database and recreates every word from the embedded dictionary.
//!
//! ## Workflow
//! 1. **Drop**: Every collection is emptied and the headword index invalidated.
//! 2. **Normalize**: Each dictionary term becomes a `NewWord` payload.
//! 3. **Create**: All words are created concurrently, each in its own transaction.
//! 4. **Index**: The headword index is rebuilt in the background and the
//!    importer waits for its ready signal, bounded by a timeout.
//! 5. **Verify**: Every headword must resolve through the index to one word
//!    per dictionary term.

use super::embedded::Dictionary;
use super::types::{DictionaryTerm, SeedReport};
use crate::entities::creation::create_word;
use crate::entities::payload::NewWord;
use crate::entities::repository::Repository;
use crate::entities::types::{DefinitionGroup, Dialect, DialectEntry};

use anyhow::{Context, Result, bail};
use futures::future::try_join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Dialect every seeded word is filed under.
pub const SEED_DIALECT: Dialect = Dialect::Nsa;

/// Builds the creation payload for one dictionary term.
///
/// The bare definitions become a single definition group tagged with the
/// term's word class (or the default one), and the word gets one dialect
/// entry keyed by the headword with its dots removed.
pub fn normalize_term(headword: &str, term: &DictionaryTerm) -> NewWord {
    let word_class = term.word_class.unwrap_or_default();
    let dialect_key = format!("{}-dialect", headword.replace('.', ""));

    NewWord {
        word: headword.to_string(),
        word_class: Some(word_class),
        definitions: vec![DefinitionGroup {
            word_class,
            definitions: term.definitions.clone(),
        }],
        variations: term.variations.clone(),
        dialects: BTreeMap::from([(
            dialect_key,
            DialectEntry {
                dialects: vec![SEED_DIALECT],
                variations: Vec::new(),
                pronunciation: String::new(),
            },
        )]),
        examples: term.examples.clone(),
        phrases: term.phrases.clone(),
    }
}

pub async fn seed(
    repo: &Arc<Repository>,
    dictionary: &Dictionary,
    index_timeout: Duration,
) -> Result<SeedReport> {
    let started = Instant::now();
    tracing::info!("Seeding database...");

    let dropped = repo
        .drop_database()
        .context("failed to drop the database")?;
    tracing::debug!("Removed {} existing documents", dropped);

    let creations = dictionary.entries().flat_map(|(headword, terms)| {
        terms
            .iter()
            .map(move |term| create_word(repo, normalize_term(headword, term)))
    });
    let words = try_join_all(creations)
        .await
        .context("failed to create dictionary words")?;

    repo.ensure_indexes();
    if !repo.wait_for_indexes(index_timeout).await {
        bail!("indexes were not ready after {:?}", index_timeout);
    }

    let indexed_headwords = repo.headword_count();
    if indexed_headwords != dictionary.len() {
        bail!(
            "indexed {} headwords, expected {}",
            indexed_headwords,
            dictionary.len()
        );
    }

    for (headword, terms) in dictionary.entries() {
        let found = repo
            .find_by_headword(headword)
            .await
            .with_context(|| format!("failed to look up '{headword}'"))?;
        if found.len() != terms.len() {
            bail!(
                "'{}' resolves to {} words, expected {}",
                headword,
                found.len(),
                terms.len()
            );
        }
    }

    let report = SeedReport {
        headwords: dictionary.len(),
        words_created: words.len(),
        indexed_headwords,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    tracing::info!(
        "Seeding successful: {} words for {} headwords in {}ms",
        report.words_created,
        report.headwords,
        report.elapsed_ms
    );
    Ok(report)
}
