//! Search template repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewSearchTemplate, SearchTemplate};

/// Repository for search template persistence (`llm_search_templates`).
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// List all templates, newest first.
    async fn list(&self) -> Result<Vec<SearchTemplate>, RepositoryError>;

    /// Get a template by its database ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the template doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<SearchTemplate, RepositoryError>;

    /// Insert a new template.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if a template with the
    /// same name already exists.
    async fn insert(&self, template: &NewSearchTemplate) -> Result<SearchTemplate, RepositoryError>;

    /// Update an existing template.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the template doesn't
    /// exist, or `Err(RepositoryError::AlreadyExists)` if renaming it would
    /// collide with another template's name.
    async fn update(&self, template: &SearchTemplate) -> Result<(), RepositoryError>;

    /// Delete a template by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the template doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
