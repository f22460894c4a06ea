//! All-or-nothing write groups.
//!
//! Writes go straight to their collections, and each one records how to undo
//! itself. `commit` forgets the undo log; dropping an uncommitted transaction
//! replays it in reverse, so a failed nested creation leaves nothing behind.

use super::memory::Collection;
use super::types::{Document, Result};

use parking_lot::Mutex;
use std::sync::Arc;

type UndoFn = Box<dyn FnOnce() + Send>;

pub struct Transaction {
    label: String,
    undo: Mutex<Vec<UndoFn>>,
    committed: bool,
}

impl Transaction {
    pub fn begin(label: impl Into<String>) -> Self {
        let label = label.into();
        tracing::debug!("Transaction '{}' started", label);
        Self {
            label,
            undo: Mutex::new(Vec::new()),
            committed: false,
        }
    }

    pub async fn insert<T: Document>(&self, collection: &Arc<Collection<T>>, doc: T) -> Result<T> {
        let stored = collection.insert(doc).await?;

        let collection = collection.clone();
        let id = stored.id().clone();
        self.undo
            .lock()
            .push(Box::new(move || collection.remove_local(&id)));

        Ok(stored)
    }

    pub async fn save<T: Document>(&self, collection: &Arc<Collection<T>>, doc: T) -> Result<T> {
        let previous = collection.save(doc.clone()).await?;

        let collection = collection.clone();
        self.undo
            .lock()
            .push(Box::new(move || collection.restore_local(previous)));

        Ok(doc)
    }

    /// Number of writes that would be undone on rollback.
    #[cfg(test)]
    pub(crate) fn pending_writes(&self) -> usize {
        self.undo.lock().len()
    }

    pub fn commit(mut self) {
        let writes = self.undo.get_mut().len();
        self.undo.get_mut().clear();
        self.committed = true;
        tracing::debug!("Transaction '{}' committed {} writes", self.label, writes);
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        let undo = std::mem::take(self.undo.get_mut());
        if undo.is_empty() {
            return;
        }

        tracing::warn!(
            "Transaction '{}' rolled back {} writes",
            self.label,
            undo.len()
        );
        for step in undo.into_iter().rev() {
            step();
        }
    }
}
