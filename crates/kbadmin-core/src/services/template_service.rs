//! Search template service - CRUD over reusable prompt templates.

use std::sync::Arc;

use crate::domain::{join_roles, NewSearchTemplate, SearchTemplate};
use crate::ports::{CoreError, TemplateRepository};

/// Operator input for creating or editing a template.
#[derive(Debug, Clone)]
pub struct TemplateDraft {
    pub template_name: String,
    pub roles: Vec<String>,
    pub prompt_content: String,
    pub created_by: String,
}

/// Service for search template management.
pub struct TemplateService {
    templates: Arc<dyn TemplateRepository>,
}

impl TemplateService {
    /// Create a new template service backed by the given repository.
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    /// List all templates, newest first.
    pub async fn list(&self) -> Result<Vec<SearchTemplate>, CoreError> {
        Ok(self.templates.list().await?)
    }

    /// Create a template. A duplicate name surfaces as
    /// `RepositoryError::AlreadyExists`.
    pub async fn create(&self, draft: TemplateDraft) -> Result<SearchTemplate, CoreError> {
        let draft = validated(draft)?;
        let template = self
            .templates
            .insert(&NewSearchTemplate {
                template_name: draft.template_name,
                roles_assigned: join_roles(&draft.roles),
                prompt_content: draft.prompt_content,
                created_by: draft.created_by,
            })
            .await?;
        tracing::info!(template = %template.template_name, "search template created");
        Ok(template)
    }

    /// Update an existing template's name, roles, and prompt text.
    pub async fn update(&self, id: i64, draft: TemplateDraft) -> Result<SearchTemplate, CoreError> {
        let draft = validated(draft)?;
        let mut template = self.templates.get_by_id(id).await?;
        template.template_name = draft.template_name;
        template.roles_assigned = join_roles(&draft.roles);
        template.prompt_content = draft.prompt_content;
        self.templates.update(&template).await?;
        let template = self.templates.get_by_id(id).await?;
        tracing::info!(template = %template.template_name, "search template updated");
        Ok(template)
    }

    /// Delete a template by ID.
    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.templates.delete(id).await?;
        tracing::info!(id, "search template deleted");
        Ok(())
    }
}

fn validated(mut draft: TemplateDraft) -> Result<TemplateDraft, CoreError> {
    draft.template_name = draft.template_name.trim().to_string();
    if draft.template_name.is_empty() {
        return Err(CoreError::field_validation(
            "template_name",
            "Template name is required",
        ));
    }
    if draft.roles.is_empty() {
        return Err(CoreError::field_validation(
            "roles",
            "Please select at least one role",
        ));
    }
    if draft.prompt_content.trim().is_empty() {
        return Err(CoreError::field_validation(
            "prompt_content",
            "Prompt content is required",
        ));
    }
    Ok(draft)
}
