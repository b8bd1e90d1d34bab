//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_document_repository;
mod sqlite_index_repository;
mod sqlite_template_repository;

pub use sqlite_document_repository::SqliteDocumentRepository;
pub use sqlite_index_repository::SqliteIndexRepository;
pub use sqlite_template_repository::SqliteTemplateRepository;
