//! Database connection handle.
//!
//! A `Connection` is opened once at startup and handed to every component that
//! needs storage. Collections borrow its open/closed state, so closing the
//! connection makes every later read or write fail with `StorageError::Closed`.

use super::memory::Collection;
use super::types::{Document, Result, StorageError};

use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// URI scheme served by the in-process store.
pub const MEMORY_SCHEME: &str = "memory://";

#[derive(Debug)]
pub(crate) struct ConnectionState {
    uri: String,
    open: AtomicBool,
}

impl ConnectionState {
    pub(crate) fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub(crate) fn uri(&self) -> &str {
        &self.uri
    }
}

/// Type-erased view of a collection, used to wipe the whole database.
trait ErasedCollection: Send + Sync {
    fn clear(&self) -> usize;
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Document> ErasedCollection for Collection<T> {
    fn clear(&self) -> usize {
        Collection::clear(self)
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

pub struct Connection {
    state: Arc<ConnectionState>,
    collections: DashMap<&'static str, Arc<dyn ErasedCollection>>,
}

impl Connection {
    /// Opens a connection to `uri`. Only `memory://<name>` URIs are served.
    pub fn open(uri: &str) -> Result<Arc<Self>> {
        let name = uri
            .strip_prefix(MEMORY_SCHEME)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| StorageError::UnsupportedUri {
                uri: uri.to_string(),
            })?;

        tracing::info!("Database '{}' is connected", name);

        Ok(Arc::new(Self {
            state: Arc::new(ConnectionState {
                uri: uri.to_string(),
                open: AtomicBool::new(true),
            }),
            collections: DashMap::new(),
        }))
    }

    pub fn uri(&self) -> &str {
        self.state.uri()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Returns the collection for `T`, creating it on first use.
    ///
    /// Lookup and creation happen under the registry's entry lock, so
    /// concurrent first callers share one collection.
    pub fn collection<T: Document>(&self) -> Arc<Collection<T>> {
        let mut entry = self.collections.entry(T::COLLECTION).or_insert_with(|| {
            Arc::new(Collection::<T>::new(self.state.clone())) as Arc<dyn ErasedCollection>
        });

        if let Ok(typed) = entry.value().clone().as_any().downcast::<Collection<T>>() {
            return typed;
        }

        tracing::warn!(
            "Collection '{}' re-registered with a different document type",
            T::COLLECTION
        );
        let collection = Arc::new(Collection::<T>::new(self.state.clone()));
        *entry = collection.clone() as Arc<dyn ErasedCollection>;
        collection
    }

    /// Removes every document from every collection. Returns how many went.
    pub fn drop_database(&self) -> Result<usize> {
        if !self.is_open() {
            return Err(StorageError::Closed {
                uri: self.uri().to_string(),
            });
        }

        let removed = self
            .collections
            .iter()
            .map(|entry| entry.value().clear())
            .sum();
        tracing::info!("Dropped database {} ({} documents)", self.uri(), removed);
        Ok(removed)
    }

    pub fn close(&self) {
        if self.state.open.swap(false, Ordering::AcqRel) {
            tracing::info!("Database connection {} closed", self.uri());
        }
    }
}
