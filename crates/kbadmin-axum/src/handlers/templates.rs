//! Search template handlers - CRUD over reusable prompt templates.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use kbadmin_core::{SearchTemplate, TemplateDraft};

use crate::error::HttpError;
use crate::state::AppState;

/// JSON body for creating or editing a template.
#[derive(Deserialize)]
pub struct TemplatePayload {
    pub template_name: String,
    pub roles: Vec<String>,
    pub prompt_content: String,
    /// Operator identity; recorded on creation, ignored on update.
    #[serde(default)]
    pub created_by: Option<String>,
}

impl TemplatePayload {
    fn into_draft(self) -> TemplateDraft {
        TemplateDraft {
            template_name: self.template_name,
            roles: self.roles,
            prompt_content: self.prompt_content,
            created_by: self.created_by.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// List all templates.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SearchTemplate>>, HttpError> {
    Ok(Json(state.templates.list().await?))
}

/// Create a template.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TemplatePayload>,
) -> Result<Json<SearchTemplate>, HttpError> {
    Ok(Json(state.templates.create(payload.into_draft()).await?))
}

/// Update a template's name, roles, and prompt text.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TemplatePayload>,
) -> Result<Json<SearchTemplate>, HttpError> {
    Ok(Json(
        state.templates.update(id, payload.into_draft()).await?,
    ))
}

/// Delete a template.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state.templates.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
