use super::connection::ConnectionState;
use super::types::{Document, DocumentId, Result, StorageError};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A document together with its insertion sequence number.
///
/// The sequence number gives `find` a stable natural order, the same order the
/// documents were first inserted in. Replacing a document keeps its number.
#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    doc: T,
}

/// An in-process collection of documents of one kind.
///
/// Every public operation is `async` and checks that the owning connection is
/// still open, so callers treat it exactly like a remote driver call.
pub struct Collection<T> {
    docs: DashMap<DocumentId, Stored<T>>,
    next_seq: AtomicU64,
    state: Arc<ConnectionState>,
}

impl<T: Document> Collection<T> {
    pub(crate) fn new(state: Arc<ConnectionState>) -> Self {
        Self {
            docs: DashMap::new(),
            next_seq: AtomicU64::new(0),
            state,
        }
    }

    pub fn name(&self) -> &'static str {
        T::COLLECTION
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state.is_open() {
            Ok(())
        } else {
            Err(StorageError::Closed {
                uri: self.state.uri().to_string(),
            })
        }
    }

    fn validate(doc: &T) -> Result<()> {
        doc.validate().map_err(|reason| StorageError::Validation {
            collection: T::COLLECTION,
            reason,
        })
    }

    /// Inserts a new document. Fails if the id is already taken.
    pub async fn insert(&self, doc: T) -> Result<T> {
        self.ensure_open()?;
        Self::validate(&doc)?;

        match self.docs.entry(doc.id().clone()) {
            Entry::Occupied(entry) => Err(StorageError::Duplicate {
                collection: T::COLLECTION,
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                entry.insert(Stored {
                    seq,
                    doc: doc.clone(),
                });
                tracing::debug!("{}: inserted {}", T::COLLECTION, doc.id());
                Ok(doc)
            }
        }
    }

    /// Replaces an existing document and returns the version it replaced.
    pub async fn save(&self, doc: T) -> Result<T> {
        self.ensure_open()?;
        Self::validate(&doc)?;

        match self.docs.get_mut(doc.id()) {
            Some(mut stored) => {
                let previous = std::mem::replace(&mut stored.doc, doc);
                tracing::debug!("{}: saved {}", T::COLLECTION, previous.id());
                Ok(previous)
            }
            None => Err(StorageError::NotFound {
                collection: T::COLLECTION,
                id: doc.id().clone(),
            }),
        }
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Result<Option<T>> {
        self.ensure_open()?;
        Ok(self.docs.get(id).map(|stored| stored.doc.clone()))
    }

    /// Resolves a list of ids, keeping the list's order and skipping ids that
    /// no longer resolve.
    pub async fn find_many(&self, ids: &[DocumentId]) -> Result<Vec<T>> {
        self.ensure_open()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.docs.get(id).map(|stored| stored.doc.clone()))
            .collect())
    }

    /// Returns every document matching `predicate`, in insertion order.
    pub async fn find<F>(&self, predicate: F) -> Result<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        self.ensure_open()?;
        let mut matches: Vec<(u64, T)> = self
            .docs
            .iter()
            .filter(|entry| predicate(&entry.value().doc))
            .map(|entry| (entry.value().seq, entry.value().doc.clone()))
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);
        Ok(matches.into_iter().map(|(_, doc)| doc).collect())
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<Option<T>> {
        self.ensure_open()?;
        Ok(self.docs.remove(id).map(|(_, stored)| stored.doc))
    }

    pub fn count(&self) -> usize {
        self.docs.len()
    }

    pub(crate) fn clear(&self) -> usize {
        let removed = self.docs.len();
        self.docs.clear();
        removed
    }

    // Undo hooks used by `Transaction`. They bypass the open check so a
    // rollback still runs after the connection was closed mid-write.

    pub(crate) fn remove_local(&self, id: &DocumentId) {
        self.docs.remove(id);
    }

    pub(crate) fn restore_local(&self, doc: T) {
        if let Some(mut stored) = self.docs.get_mut(doc.id()) {
            stored.doc = doc;
        }
    }
}
