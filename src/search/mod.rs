//! Search Service Module
//!
//! Turns a free-text keyword into a diacritic-aware, whole-word pattern and
//! runs it against the document store or the embedded dictionary.
//!
//! ## Pipeline
//! 1. **Keyword**: Trim, drop a leading `"to "`, fold away combining marks.
//! 2. **Pattern**: Expand each letter to its diacritic family and add word boundaries.
//! 3. **Match**: Headwords and variations first, definitions as a fallback.
//!
//! ## Submodules
//! - **`diacritics`**: Per-letter diacritic families.
//! - **`keyword`**: Keyword clean-up.
//! - **`pattern`**: The whole-word `SearchPattern`.
//! - **`engine`**: Search policies over both corpora.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Query parameters.

pub mod diacritics;
pub mod engine;
pub mod handlers;
pub mod keyword;
pub mod pattern;
pub mod types;
