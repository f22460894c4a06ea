//! Entity Repository
//!
//! Create and find operations over the `words`, `phrases` and `examples`
//! collections, plus the headword index used to confirm a bulk import landed.
//!
//! Search results are "populated": each word's phrase ids are replaced by the
//! phrase documents, and each phrase's example ids by the example documents.

use super::types::{Example, Phrase, PopulatedPhrase, PopulatedWord, Word};
use crate::search::pattern::SearchPattern;
use crate::storage::types::Result;
use crate::storage::{Collection, Connection, Document, DocumentId, Transaction};

use dashmap::DashMap;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;

pub struct Repository {
    connection: Arc<Connection>,
    words: Arc<Collection<Word>>,
    phrases: Arc<Collection<Phrase>>,
    examples: Arc<Collection<Example>>,
    headwords: DashMap<String, Vec<DocumentId>>,
    index_generation: AtomicU64,
    index_ready: watch::Sender<bool>,
}

impl Repository {
    pub fn new(connection: Arc<Connection>) -> Arc<Self> {
        let (index_ready, _) = watch::channel(false);
        Arc::new(Self {
            words: connection.collection(),
            phrases: connection.collection(),
            examples: connection.collection(),
            connection,
            headwords: DashMap::new(),
            index_generation: AtomicU64::new(0),
            index_ready,
        })
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    pub fn words(&self) -> &Arc<Collection<Word>> {
        &self.words
    }

    pub fn phrases(&self) -> &Arc<Collection<Phrase>> {
        &self.phrases
    }

    pub fn examples(&self) -> &Arc<Collection<Example>> {
        &self.examples
    }

    // --- Writes ---

    /// Persists a new document of any kind as part of `tx`.
    pub async fn create<T: Document>(&self, tx: &Transaction, doc: T) -> Result<T> {
        tx.insert(&self.connection.collection::<T>(), doc).await
    }

    /// Replaces a stored document as part of `tx`.
    pub async fn save<T: Document>(&self, tx: &Transaction, doc: T) -> Result<T> {
        tx.save(&self.connection.collection::<T>(), doc).await
    }

    // --- Reads ---

    pub async fn find_word(&self, id: &DocumentId) -> Result<Option<PopulatedWord>> {
        match self.words.find_by_id(id).await? {
            Some(word) => Ok(Some(self.populate(word).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_phrase(&self, id: &DocumentId) -> Result<Option<PopulatedPhrase>> {
        match self.phrases.find_by_id(id).await? {
            Some(phrase) => Ok(Some(self.populate_phrase(phrase).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_example(&self, id: &DocumentId) -> Result<Option<Example>> {
        self.examples.find_by_id(id).await
    }

    /// Every word matching `predicate`, populated, in insertion order.
    pub async fn find_words<F>(&self, predicate: F) -> Result<Vec<PopulatedWord>>
    where
        F: Fn(&Word) -> bool,
    {
        let words = self.words.find(predicate).await?;
        try_join_all(words.into_iter().map(|word| self.populate(word))).await
    }

    /// Words whose headword or any spelling variation matches `pattern`.
    pub async fn search_igbo(&self, pattern: &SearchPattern) -> Result<Vec<PopulatedWord>> {
        self.find_words(|word| {
            pattern.is_match(&word.word) || pattern.matches_any(&word.variations)
        })
        .await
    }

    /// Words with any definition, in any definition group, matching `pattern`.
    pub async fn search_english(&self, pattern: &SearchPattern) -> Result<Vec<PopulatedWord>> {
        self.find_words(|word| pattern.matches_any(word.all_definitions()))
            .await
    }

    async fn populate(&self, word: Word) -> Result<PopulatedWord> {
        let phrases = self.phrases.find_many(&word.phrases).await?;
        let phrases = try_join_all(
            phrases
                .into_iter()
                .map(|phrase| self.populate_phrase(phrase)),
        )
        .await?;
        Ok(PopulatedWord::new(word, phrases))
    }

    async fn populate_phrase(&self, phrase: Phrase) -> Result<PopulatedPhrase> {
        let examples = self.examples.find_many(&phrase.examples).await?;
        Ok(PopulatedPhrase::new(phrase, examples))
    }

    // --- Headword index ---

    /// Starts rebuilding the headword index in the background and returns
    /// immediately. `wait_for_indexes` resolves once the rebuild is published.
    ///
    /// A rebuild that is overtaken by a newer one, or by `drop_database`, is
    /// discarded.
    pub fn ensure_indexes(self: &Arc<Self>) {
        let generation = self.index_generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.index_ready.send_replace(false);

        let repo = Arc::clone(self);
        tokio::spawn(async move {
            match repo.build_indexes(generation).await {
                Ok(Some(headwords)) => {
                    tracing::info!("Headword index ready: {} headwords", headwords)
                }
                Ok(None) => tracing::debug!("Headword index build {} superseded", generation),
                Err(e) => tracing::error!("Failed to build the headword index: {}", e),
            }
        });
    }

    async fn build_indexes(&self, generation: u64) -> Result<Option<usize>> {
        let words = self.words.find(|_| true).await?;

        let mut index: HashMap<String, Vec<DocumentId>> = HashMap::new();
        for word in words {
            index.entry(word.word).or_default().push(word.id);
        }

        if self.index_generation.load(Ordering::Acquire) != generation {
            return Ok(None);
        }

        // `index_word` may have run during the scan, so merge.
        for (headword, ids) in index {
            let mut entry = self.headwords.entry(headword).or_default();
            for id in ids {
                if !entry.contains(&id) {
                    entry.push(id);
                }
            }
        }

        self.index_ready.send_replace(true);
        Ok(Some(self.headwords.len()))
    }

    /// Adds a committed word to the headword index.
    pub fn index_word(&self, word: &Word) {
        let mut ids = self.headwords.entry(word.word.clone()).or_default();
        if !ids.contains(&word.id) {
            ids.push(word.id.clone());
        }
    }

    pub fn indexes_ready(&self) -> bool {
        *self.index_ready.borrow()
    }

    /// Waits until a rebuild started by `ensure_indexes` is published, up to
    /// `timeout`.
    pub async fn wait_for_indexes(&self, timeout: Duration) -> bool {
        let mut ready = self.index_ready.subscribe();
        matches!(
            tokio::time::timeout(timeout, ready.wait_for(|ready| *ready)).await,
            Ok(Ok(_))
        )
    }

    /// Exact headword lookup. Uses the index once it is ready and scans the
    /// collection before that.
    pub async fn find_by_headword(&self, headword: &str) -> Result<Vec<PopulatedWord>> {
        if !self.indexes_ready() {
            return self.find_words(|word| word.word == headword).await;
        }

        let ids = self
            .headwords
            .get(headword)
            .map(|ids| ids.clone())
            .unwrap_or_default();
        let words = self.words.find_many(&ids).await?;
        try_join_all(words.into_iter().map(|word| self.populate(word))).await
    }

    pub fn headword_count(&self) -> usize {
        self.headwords.len()
    }

    /// Removes every document and invalidates the headword index.
    pub fn drop_database(&self) -> Result<usize> {
        self.index_generation.fetch_add(1, Ordering::AcqRel);
        self.index_ready.send_replace(false);
        self.headwords.clear();
        self.connection.drop_database()
    }
}
