//! Index handlers - the upload, listing, and deletion endpoints.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;

use kbadmin_core::{
    CreateIndexRequest, DeleteIndexReport, DocIndex, IndexDocument, IndexOverview, UploadFile,
};

use crate::error::HttpError;
use crate::state::AppState;

/// Response body for index creation.
#[derive(Serialize)]
pub struct CreateIndexResponse {
    pub message: String,
    pub index: DocIndex,
    pub documents: Vec<IndexDocument>,
    pub synced: bool,
}

/// Response body for adding documents to an index.
#[derive(Serialize)]
pub struct AddDocumentsResponse {
    pub message: String,
    pub documents: Vec<IndexDocument>,
}

/// Response body for a retry-sync request.
#[derive(Serialize)]
pub struct RetrySyncResponse {
    pub sync_status: String,
}

/// The fields an upload form can carry. `index_name` stays empty for the
/// add-documents endpoint, which takes the name from the path.
struct UploadForm {
    index_name: String,
    roles: Vec<String>,
    files: Vec<UploadFile>,
}

/// Read a multipart upload form. Role fields may repeat and may each hold a
/// comma-separated list; file fields must carry a filename.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, HttpError> {
    let mut form = UploadForm {
        index_name: String::new(),
        roles: Vec::new(),
        files: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "index_name" => {
                form.index_name = field
                    .text()
                    .await
                    .map_err(|e| HttpError::bad_request(format!("Invalid index_name field: {e}")))?;
            }
            "roles" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| HttpError::bad_request(format!("Invalid roles field: {e}")))?;
                form.roles.extend(
                    text.split(',')
                        .map(str::trim)
                        .filter(|role| !role.is_empty())
                        .map(String::from),
                );
            }
            "files" => {
                let file_name = field
                    .file_name()
                    .ok_or_else(|| HttpError::bad_request("File field is missing a filename"))?
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| HttpError::bad_request(format!("Failed to read file: {e}")))?
                    .to_vec();
                form.files.push(UploadFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            // Unknown fields are ignored so the form can evolve.
            _ => {}
        }
    }

    Ok(form)
}

/// List all indices with documents and derived sync status.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<IndexOverview>>, HttpError> {
    Ok(Json(state.indices.list_overviews().await?))
}

/// Create an index from a multipart form (`index_name`, `roles`, `files`).
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CreateIndexResponse>, HttpError> {
    let form = read_upload_form(multipart).await?;
    let outcome = state
        .indices
        .create_index(CreateIndexRequest {
            index_name: form.index_name,
            roles: form.roles,
            files: form.files,
        })
        .await?;

    let message = if outcome.synced {
        format!("Index '{}' created and ingested", outcome.index.index_name)
    } else {
        format!(
            "Index '{}' created; documents uploaded but ingestion has not completed yet",
            outcome.index.index_name
        )
    };
    Ok(Json(CreateIndexResponse {
        message,
        index: outcome.index,
        documents: outcome.documents,
        synced: outcome.synced,
    }))
}

/// Fetch one index with its documents.
pub async fn list_documents(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<IndexOverview>, HttpError> {
    Ok(Json(state.indices.get_overview(&name).await?))
}

/// Add documents to an existing index from a multipart form (`files`).
pub async fn add_documents(
    State(state): State<AppState>,
    Path(name): Path<String>,
    multipart: Multipart,
) -> Result<Json<AddDocumentsResponse>, HttpError> {
    let form = read_upload_form(multipart).await?;
    let documents = state.indices.add_documents(&name, form.files).await?;

    Ok(Json(AddDocumentsResponse {
        message: format!("Added {} document(s) to index '{name}'", documents.len()),
        documents,
    }))
}

/// Delete an index across the vector service, database, and storage.
pub async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteIndexReport>, HttpError> {
    Ok(Json(state.indices.delete_index(&name).await?))
}

/// Re-derive an index's sync status after the UI's retry delay.
pub async fn retry_sync(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RetrySyncResponse>, HttpError> {
    let status = state.indices.retry_sync(&name).await?;
    Ok(Json(RetrySyncResponse {
        sync_status: status.to_string(),
    }))
}
