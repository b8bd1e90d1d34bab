//! `SQLite` implementation of the `DocumentRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use kbadmin_core::{DocumentRepository, IndexDocument, NewIndexDocument, RepositoryError};

use super::row_mappers::{row_to_document, DOCUMENT_SELECT_COLUMNS};

/// `SQLite` implementation of the `DocumentRepository` trait.
pub struct SqliteDocumentRepository {
    pool: SqlitePool,
}

impl SqliteDocumentRepository {
    /// Create a new `SQLite` document repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn get_by_id(&self, id: i64) -> Result<IndexDocument, RepositoryError> {
        let query = format!("SELECT {DOCUMENT_SELECT_COLUMNS} FROM llm_index_docs WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("Document with ID {id}")))?;

        row_to_document(&row)
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn list_for_index(&self, index_id: i64) -> Result<Vec<IndexDocument>, RepositoryError> {
        let query = format!(
            "SELECT {DOCUMENT_SELECT_COLUMNS} FROM llm_index_docs \
             WHERE index_id = ? ORDER BY created_at ASC, id ASC"
        );

        let rows = sqlx::query(&query)
            .bind(index_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_document).collect()
    }

    async fn insert_many(
        &self,
        documents: &[NewIndexDocument],
    ) -> Result<Vec<IndexDocument>, RepositoryError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        // One transaction so the batch lands or rolls back as a whole.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            let result = sqlx::query(
                "INSERT INTO llm_index_docs (index_id, file_name, file_url, is_in_vector_store) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(document.index_id)
            .bind(&document.file_name)
            .bind(&document.file_url)
            .bind(document.synced)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
            ids.push(result.last_insert_rowid());
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let mut inserted = Vec::with_capacity(ids.len());
        for id in ids {
            inserted.push(self.get_by_id(id).await?);
        }
        Ok(inserted)
    }

    async fn set_synced(&self, id: i64, synced: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE llm_index_docs SET is_in_vector_store = ? WHERE id = ?")
            .bind(synced)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Document with ID {id}")));
        }
        Ok(())
    }

    async fn set_synced_for_index(
        &self,
        index_id: i64,
        synced: bool,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE llm_index_docs SET is_in_vector_store = ? WHERE index_id = ?")
            .bind(synced)
            .bind(index_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<(), RepositoryError> {
        if ids.is_empty() {
            return Ok(());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("DELETE FROM llm_index_docs WHERE id IN ({placeholders})");

        let mut statement = sqlx::query(&query);
        for id in ids {
            statement = statement.bind(id);
        }
        statement
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteIndexRepository;
    use crate::setup::setup_test_database;
    use kbadmin_core::{IndexRepository, NewDocIndex};

    async fn harness() -> (SqliteIndexRepository, SqliteDocumentRepository, i64) {
        let pool = setup_test_database().await.unwrap();
        let indices = SqliteIndexRepository::new(pool.clone());
        let documents = SqliteDocumentRepository::new(pool);
        let index = indices
            .insert(&NewDocIndex {
                index_name: "handbook".to_string(),
                roles_allowed: "Admin".to_string(),
                synced: false,
            })
            .await
            .unwrap();
        (indices, documents, index.id)
    }

    fn new_document(index_id: i64, file_name: &str) -> NewIndexDocument {
        NewIndexDocument {
            index_id,
            file_name: file_name.to_string(),
            file_url: format!("https://storage.test/handbook/{file_name}"),
            synced: false,
        }
    }

    #[tokio::test]
    async fn insert_many_assigns_ids_in_order() {
        let (_indices, documents, index_id) = harness().await;

        let inserted = documents
            .insert_many(&[
                new_document(index_id, "a.pdf"),
                new_document(index_id, "b.pdf"),
            ])
            .await
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert!(inserted[0].id < inserted[1].id);
        assert_eq!(inserted[0].file_name, "a.pdf");
    }

    #[tokio::test]
    async fn insert_many_rejects_unknown_index() {
        let (_indices, documents, _index_id) = harness().await;

        let result = documents.insert_many(&[new_document(999, "a.pdf")]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn set_synced_for_index_flips_every_row() {
        let (_indices, documents, index_id) = harness().await;
        documents
            .insert_many(&[
                new_document(index_id, "a.pdf"),
                new_document(index_id, "b.pdf"),
            ])
            .await
            .unwrap();

        documents.set_synced_for_index(index_id, true).await.unwrap();

        let all = documents.list_for_index(index_id).await.unwrap();
        assert!(all.iter().all(|d| d.synced));
    }

    #[tokio::test]
    async fn delete_many_removes_only_named_rows() {
        let (_indices, documents, index_id) = harness().await;
        let inserted = documents
            .insert_many(&[
                new_document(index_id, "a.pdf"),
                new_document(index_id, "b.pdf"),
            ])
            .await
            .unwrap();

        documents.delete_many(&[inserted[0].id]).await.unwrap();

        let remaining = documents.list_for_index(index_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].file_name, "b.pdf");
    }
}
