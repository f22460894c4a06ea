//! Dictionary Entities Module
//!
//! Words, phrases and examples: their document types, the repository that
//! stores and finds them, and the orchestrator that creates a word together
//! with everything nested under it.
//!
//! ## Submodules
//! - **`types`**: Stored documents and their populated views.
//! - **`payload`**: Creation payloads validated at the HTTP boundary.
//! - **`repository`**: Create/find operations and the headword index.
//! - **`creation`**: Nested creation with a join barrier and rollback.
//! - **`handlers`**: Axum handlers for the create and get-by-id routes.

pub mod creation;
pub mod handlers;
pub mod payload;
pub mod repository;
pub mod types;
