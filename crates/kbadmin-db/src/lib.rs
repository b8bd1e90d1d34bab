//! `SQLite` persistence layer for kbadmin.
//!
//! Implements the repository ports from `kbadmin-core` over a single
//! `SQLite` database with three tables: `llm_index`, `llm_index_docs`,
//! and `llm_search_templates`.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{SqliteDocumentRepository, SqliteIndexRepository, SqliteTemplateRepository};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
