//! `SQLite` implementation of the `IndexRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use kbadmin_core::{DocIndex, IndexRepository, NewDocIndex, RepositoryError};

use super::row_mappers::{map_write_error, row_to_index, INDEX_SELECT_COLUMNS};

/// `SQLite` implementation of the `IndexRepository` trait.
///
/// This struct holds a connection pool and implements all CRUD operations
/// for `llm_index` rows using `SQLite`.
pub struct SqliteIndexRepository {
    pool: SqlitePool,
}

impl SqliteIndexRepository {
    /// Create a new `SQLite` index repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IndexRepository for SqliteIndexRepository {
    async fn list(&self) -> Result<Vec<DocIndex>, RepositoryError> {
        let query = format!(
            "SELECT {INDEX_SELECT_COLUMNS} FROM llm_index ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_index).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<DocIndex, RepositoryError> {
        let query = format!("SELECT {INDEX_SELECT_COLUMNS} FROM llm_index WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("Index with ID {id}")))?;

        row_to_index(&row)
    }

    async fn get_by_name(&self, name: &str) -> Result<DocIndex, RepositoryError> {
        let query = format!("SELECT {INDEX_SELECT_COLUMNS} FROM llm_index WHERE index_name = ?");

        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("Index named '{name}'")))?;

        row_to_index(&row)
    }

    async fn insert(&self, index: &NewDocIndex) -> Result<DocIndex, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO llm_index (index_name, roles_allowed, is_in_vector_store) \
             VALUES (?, ?, ?)",
        )
        .bind(&index.index_name)
        .bind(&index.roles_allowed)
        .bind(index.synced)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("Index named '{}'", index.index_name)))?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn set_synced(&self, id: i64, synced: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE llm_index SET is_in_vector_store = ?, updated_at = datetime('now') \
             WHERE id = ?",
        )
        .bind(synced)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Index with ID {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM llm_index WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Index with ID {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> SqliteIndexRepository {
        let pool = setup_test_database().await.unwrap();
        SqliteIndexRepository::new(pool)
    }

    fn new_index(name: &str) -> NewDocIndex {
        NewDocIndex {
            index_name: name.to_string(),
            roles_allowed: "Admin, Analyst".to_string(),
            synced: false,
        }
    }

    #[tokio::test]
    async fn insert_and_fetch_round_trip() {
        let repo = repo().await;

        let inserted = repo.insert(&new_index("handbook")).await.unwrap();
        assert!(inserted.id > 0);
        assert!(!inserted.synced);

        let by_name = repo.get_by_name("handbook").await.unwrap();
        assert_eq!(by_name.id, inserted.id);
        assert_eq!(by_name.roles_allowed, "Admin, Analyst");
    }

    #[tokio::test]
    async fn duplicate_name_maps_to_already_exists() {
        let repo = repo().await;
        repo.insert(&new_index("handbook")).await.unwrap();

        let err = repo.insert(&new_index("handbook")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn set_synced_updates_flag_and_timestamp() {
        let repo = repo().await;
        let inserted = repo.insert(&new_index("handbook")).await.unwrap();

        repo.set_synced(inserted.id, true).await.unwrap();

        let fetched = repo.get_by_id(inserted.id).await.unwrap();
        assert!(fetched.synced);
        assert!(fetched.updated_at.is_some());
    }

    #[tokio::test]
    async fn missing_rows_surface_not_found() {
        let repo = repo().await;

        assert!(matches!(
            repo.get_by_id(99).await.unwrap_err(),
            RepositoryError::NotFound(_)
        ));
        assert!(matches!(
            repo.set_synced(99, true).await.unwrap_err(),
            RepositoryError::NotFound(_)
        ));
        assert!(matches!(
            repo.delete(99).await.unwrap_err(),
            RepositoryError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = repo().await;
        repo.insert(&new_index("first")).await.unwrap();
        repo.insert(&new_index("second")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].index_name, "second");
    }
}
