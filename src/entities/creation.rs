//! Nested-Creation Orchestrator
//!
//! Creates a word together with its phrases and examples, then links the
//! generated ids back onto the parents.
//!
//! ## Order of writes
//! 1. The word, without child ids.
//! 2. Every phrase (and, under it, every phrase example), concurrently with
//! 3. every top-level example of the word.
//! 4. Once all of 2 and 3 have settled, the word is saved with the collected ids.
//!
//! Steps 2 and 3 run interleaved on the calling task. The whole creation is a
//! single `Transaction`: if any write fails the join aborts and every document
//! written so far is removed again.

use super::payload::{CreatePhrase, NewPhrase, NewWord};
use super::repository::Repository;
use super::types::{Example, Phrase, Word};
use crate::storage::types::{Result, StorageError};
use crate::storage::{Document, DocumentId, Transaction};

use futures::future::try_join_all;

/// Creates a word with all of its phrases and examples.
pub async fn create_word(repo: &Repository, payload: NewWord) -> Result<Word> {
    let tx = Transaction::begin(format!("create word '{}'", payload.word));
    let word = create_word_in(repo, &tx, payload).await?;
    tx.commit();

    repo.index_word(&word);
    tracing::debug!(
        "Created word '{}' ({} phrases, {} examples)",
        word.word,
        word.phrases.len(),
        word.examples.len()
    );
    Ok(word)
}

/// Adds a phrase (and its examples) to an existing word.
pub async fn create_phrase(repo: &Repository, payload: CreatePhrase) -> Result<Phrase> {
    let mut parent = repo
        .words()
        .find_by_id(&payload.word)
        .await?
        .ok_or_else(|| StorageError::NotFound {
            collection: Word::COLLECTION,
            id: payload.word.clone(),
        })?;

    let tx = Transaction::begin(format!("create phrase '{}'", payload.phrase));
    let phrase = create_phrase_in(
        repo,
        &tx,
        &parent.id,
        payload.phrase,
        NewPhrase {
            definitions: payload.definitions,
            examples: payload.examples,
        },
    )
    .await?;

    parent.phrases.push(phrase.id.clone());
    repo.save(&tx, parent).await?;
    tx.commit();

    Ok(phrase)
}

async fn create_word_in(repo: &Repository, tx: &Transaction, payload: NewWord) -> Result<Word> {
    let word_class = payload.word_class();
    let NewWord {
        word,
        definitions,
        variations,
        dialects,
        examples,
        phrases,
        ..
    } = payload;

    let mut word = repo
        .create(
            tx,
            Word {
                id: DocumentId::new(),
                word,
                word_class,
                definitions,
                variations,
                dialects,
                phrases: Vec::new(),
                examples: Vec::new(),
            },
        )
        .await?;

    let parent = word.id.clone();
    let phrase_creations = phrases
        .into_iter()
        .map(|(text, phrase)| create_phrase_in(repo, tx, &parent, text, phrase));
    let example_creations = examples
        .into_iter()
        .map(|text| create_example_in(repo, tx, text, &parent, None));

    let (phrases, examples) = futures::try_join!(
        try_join_all(phrase_creations),
        try_join_all(example_creations)
    )?;

    word.phrases = phrases.into_iter().map(|phrase| phrase.id).collect();
    word.examples = examples.into_iter().map(|example| example.id).collect();
    repo.save(tx, word).await
}

async fn create_phrase_in(
    repo: &Repository,
    tx: &Transaction,
    parent_word: &DocumentId,
    text: String,
    payload: NewPhrase,
) -> Result<Phrase> {
    let mut phrase = repo
        .create(
            tx,
            Phrase {
                id: DocumentId::new(),
                phrase: text,
                parent_word: parent_word.clone(),
                definitions: payload.definitions,
                examples: Vec::new(),
            },
        )
        .await?;

    let parent_phrase = phrase.id.clone();
    let examples = try_join_all(
        payload
            .examples
            .into_iter()
            .map(|text| create_example_in(repo, tx, text, parent_word, Some(&parent_phrase))),
    )
    .await?;

    phrase.examples = examples.into_iter().map(|example| example.id).collect();
    repo.save(tx, phrase).await
}

async fn create_example_in(
    repo: &Repository,
    tx: &Transaction,
    text: String,
    parent_word: &DocumentId,
    parent_phrase: Option<&DocumentId>,
) -> Result<Example> {
    repo.create(
        tx,
        Example {
            id: DocumentId::new(),
            example: text,
            parent_word: parent_word.clone(),
            parent_phrase: parent_phrase.cloned(),
        },
    )
    .await
}
