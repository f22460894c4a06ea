//! Igbo-English Dictionary Service Library
//!
//! This library crate defines the modules behind the lookup API. It serves as
//! the foundation for the binary executable (`main.rs`) and the HTTP tests.
//!
//! ## Architecture Modules
//! - **`storage`**: In-process document store. Explicit connection handle,
//!   typed collections, and transactions that roll back unless committed.
//! - **`entities`**: Words, phrases and examples, their repository, and the
//!   nested creation orchestrator.
//! - **`search`**: Diacritic-aware whole-word patterns and the search policies.
//! - **`dictionary`**: The embedded Igbo-English dictionary and the seed importer.
//! - **`app`**: The Axum router tying the handlers together.
//! - **`config`**, **`error`**, **`shutdown`**: Runtime flags, the HTTP error
//!   type, and the graceful shutdown handle.

pub mod app;
pub mod config;
pub mod dictionary;
pub mod entities;
pub mod error;
pub mod search;
pub mod shutdown;
pub mod storage;
