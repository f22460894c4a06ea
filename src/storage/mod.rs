//! Document Storage Module
//!
//! An in-process document store with the shape of a database driver.
//!
//! ## Core Concepts
//! - **Connection**: Explicitly opened handle that owns every collection and can be closed.
//! - **Collection**: Typed set of documents keyed by `DocumentId`, validated on every write.
//! - **Transaction**: Records an undo step per write and rolls everything back unless committed.

pub mod connection;
pub mod memory;
pub mod transaction;
pub mod types;

pub use connection::Connection;
pub use memory::Collection;
pub use transaction::Transaction;
pub use types::{Document, DocumentId, StorageError};

#[cfg(test)]
mod tests;
