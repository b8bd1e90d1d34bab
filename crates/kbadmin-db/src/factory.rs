//! Composition utilities for building repositories with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use kbadmin_core::Repos;

use crate::repositories::{
    SqliteDocumentRepository, SqliteIndexRepository, SqliteTemplateRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
///
/// This struct provides composition utilities only, no domain logic.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:/var/lib/kbadmin/kbadmin.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    /// Returns a `Repos` struct from `kbadmin-core` containing
    /// trait-object-wrapped repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteIndexRepository::new(pool.clone())),
            Arc::new(SqliteDocumentRepository::new(pool.clone())),
            Arc::new(SqliteTemplateRepository::new(pool)),
        )
    }

    /// Create an index repository from a pool.
    pub fn index_repository(pool: SqlitePool) -> Arc<SqliteIndexRepository> {
        Arc::new(SqliteIndexRepository::new(pool))
    }

    /// Create a document repository from a pool.
    pub fn document_repository(pool: SqlitePool) -> Arc<SqliteDocumentRepository> {
        Arc::new(SqliteDocumentRepository::new(pool))
    }

    /// Create a template repository from a pool.
    pub fn template_repository(pool: SqlitePool) -> Arc<SqliteTemplateRepository> {
        Arc::new(SqliteTemplateRepository::new(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with full schema already applied.
/// Matches the production schema to ensure test parity.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build all repositories against this test database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }

    /// Create an index repository using this test database.
    pub fn index_repository(&self) -> SqliteIndexRepository {
        SqliteIndexRepository::new(self.pool.clone())
    }

    /// Create a document repository using this test database.
    pub fn document_repository(&self) -> SqliteDocumentRepository {
        SqliteDocumentRepository::new(self.pool.clone())
    }

    /// Create a template repository using this test database.
    pub fn template_repository(&self) -> SqliteTemplateRepository {
        SqliteTemplateRepository::new(self.pool.clone())
    }
}
