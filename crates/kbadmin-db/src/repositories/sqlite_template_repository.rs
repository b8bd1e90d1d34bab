//! `SQLite` implementation of the `TemplateRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use kbadmin_core::{NewSearchTemplate, RepositoryError, SearchTemplate, TemplateRepository};

use super::row_mappers::{map_write_error, row_to_template, TEMPLATE_SELECT_COLUMNS};

/// `SQLite` implementation of the `TemplateRepository` trait.
pub struct SqliteTemplateRepository {
    pool: SqlitePool,
}

impl SqliteTemplateRepository {
    /// Create a new `SQLite` template repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for SqliteTemplateRepository {
    async fn list(&self) -> Result<Vec<SearchTemplate>, RepositoryError> {
        let query = format!(
            "SELECT {TEMPLATE_SELECT_COLUMNS} FROM llm_search_templates \
             ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_template).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<SearchTemplate, RepositoryError> {
        let query = format!("SELECT {TEMPLATE_SELECT_COLUMNS} FROM llm_search_templates WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("Template with ID {id}")))?;

        row_to_template(&row)
    }

    async fn insert(
        &self,
        template: &NewSearchTemplate,
    ) -> Result<SearchTemplate, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO llm_search_templates \
             (template_name, roles_assigned, prompt_content, created_by) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&template.template_name)
        .bind(&template.roles_assigned)
        .bind(&template.prompt_content)
        .bind(&template.created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, &format!("Template named '{}'", template.template_name))
        })?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn update(&self, template: &SearchTemplate) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE llm_search_templates SET \
             template_name = ?, roles_assigned = ?, prompt_content = ?, \
             updated_at = datetime('now') \
             WHERE id = ?",
        )
        .bind(&template.template_name)
        .bind(&template.roles_assigned)
        .bind(&template.prompt_content)
        .bind(template.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, &format!("Template named '{}'", template.template_name))
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Template with ID {}",
                template.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM llm_search_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Template with ID {id}")));
        }
        Ok(())
    }
}
