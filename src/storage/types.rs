use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned to every stored document.
///
/// Wrapper around a UUID v4 string, generated when a document is first built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A value that can live in a [`Collection`](super::memory::Collection).
///
/// `validate` runs on every write, so a document that breaks its required-field
/// rules never reaches the store.
pub trait Document: Clone + Send + Sync + 'static {
    /// Collection name used in logs and errors.
    const COLLECTION: &'static str;

    fn id(&self) -> &DocumentId;

    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{collection} validation failed: {reason}")]
    Validation {
        collection: &'static str,
        reason: String,
    },

    #[error("{collection} document {id} not found")]
    NotFound {
        collection: &'static str,
        id: DocumentId,
    },

    #[error("{collection} document {id} already exists")]
    Duplicate {
        collection: &'static str,
        id: DocumentId,
    },

    #[error("connection to {uri} is closed")]
    Closed { uri: String },

    #[error("unsupported database uri: {uri}")]
    UnsupportedUri { uri: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;
