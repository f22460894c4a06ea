//! Static Dictionary Module
//!
//! The Igbo-English dictionary shipped inside the binary, and the importer
//! that loads it into the document store.
//!
//! ## Submodules
//! - **`embedded`**: Parses `data/ig-en.json` and searches it directly.
//! - **`seed`**: Normalizes dictionary terms into word payloads and bulk-creates them.
//! - **`handlers`**: The seeding route.
//! - **`types`**: Dictionary term shape and the seed report.

pub mod embedded;
pub mod handlers;
pub mod seed;
pub mod types;
