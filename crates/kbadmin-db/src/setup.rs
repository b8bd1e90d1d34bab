//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::path::Path;
use std::str::FromStr;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// This function:
/// 1. Establishes a connection to the `SQLite` database file
/// 2. Creates the database file if it doesn't exist
/// 3. Creates all tables and indexes
///
/// Foreign keys are enabled on every connection so that deleting an index
/// row cascades to its document rows.
///
/// # Errors
///
/// Returns an error if:
/// - The database file cannot be opened or created
/// - Schema creation fails
///
/// # Example
///
/// ```rust,no_run
/// use kbadmin_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let db_path = Path::new("/path/to/kbadmin.db");
/// let pool = setup_database(db_path).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true),
    )
    .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// This function creates all tables and indexes required by the application.
/// It is safe to call multiple times as all operations use IF NOT EXISTS.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Index metadata table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS llm_index (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            index_name TEXT NOT NULL,
            roles_allowed TEXT NOT NULL,
            is_in_vector_store INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Unique index on index_name (canonical identity across all three systems)
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_llm_index_name ON llm_index(index_name)")
        .execute(pool)
        .await?;

    // Per-index document rows
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS llm_index_docs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            index_id INTEGER NOT NULL,
            file_name TEXT NOT NULL,
            file_url TEXT NOT NULL,
            is_in_vector_store INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (index_id) REFERENCES llm_index(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Index on index_id for faster document queries
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_llm_index_docs_index ON llm_index_docs(index_id)")
        .execute(pool)
        .await?;

    // Search templates table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS llm_search_templates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            template_name TEXT NOT NULL,
            roles_assigned TEXT NOT NULL,
            prompt_content TEXT NOT NULL,
            created_by TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Unique index on template_name
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_llm_search_templates_name \
         ON llm_search_templates(template_name)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_database() {
        let pool = setup_test_database().await.unwrap();

        // Verify tables exist by querying them
        let _: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM llm_index")
            .fetch_one(&pool)
            .await
            .unwrap();

        let _: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM llm_index_docs")
            .fetch_one(&pool)
            .await
            .unwrap();

        let _: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM llm_search_templates")
            .fetch_one(&pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn index_name_is_unique() {
        let pool = setup_test_database().await.unwrap();

        sqlx::query("INSERT INTO llm_index (index_name, roles_allowed) VALUES ('hr', 'Admin')")
            .execute(&pool)
            .await
            .unwrap();

        let dup =
            sqlx::query("INSERT INTO llm_index (index_name, roles_allowed) VALUES ('hr', 'Admin')")
                .execute(&pool)
                .await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn deleting_index_cascades_to_documents() {
        let pool = setup_test_database().await.unwrap();

        sqlx::query("INSERT INTO llm_index (index_name, roles_allowed) VALUES ('hr', 'Admin')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO llm_index_docs (index_id, file_name, file_url) \
             VALUES (1, 'a.pdf', 'https://x/a.pdf')",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("DELETE FROM llm_index WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM llm_index_docs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
