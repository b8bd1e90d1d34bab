//! Index service - orchestrates the multi-system index workflows.
//!
//! Every workflow here sequences calls against three collaborators (object
//! storage, database, vector service) with no transaction coordinator.
//! The compensation rule is: a failed request rolls back exactly what it
//! created, except a create-index ingestion failure, which is a supported
//! "unsynced" partial state the operator can see and retry.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    join_roles, DocIndex, IndexDocument, IndexOverview, NewDocIndex, NewIndexDocument, SyncStatus,
    UploadFile, SIGNED_URL_TTL_SECS,
};
use crate::ports::{
    CoreError, DocumentRepository, IndexRepository, ObjectStore, RepositoryError,
    VectorIndexClient,
};

/// Fixed delay behind the index list's "retry sync" affordance.
const RETRY_SYNC_DELAY: Duration = Duration::from_millis(1500);

/// Input for the create-index workflow.
#[derive(Debug, Clone)]
pub struct CreateIndexRequest {
    pub index_name: String,
    pub roles: Vec<String>,
    pub files: Vec<UploadFile>,
}

/// Result of the create-index workflow.
///
/// `synced == false` means the rows and storage objects exist but the
/// vector service has not ingested them ("uploaded but not yet processed").
#[derive(Debug, Clone)]
pub struct CreateIndexOutcome {
    pub index: DocIndex,
    pub documents: Vec<IndexDocument>,
    pub synced: bool,
}

/// Report from the delete-index workflow. The external removal succeeded;
/// `warnings` collects every best-effort local cleanup stage that didn't.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DeleteIndexReport {
    pub index_name: String,
    pub db_row_deleted: bool,
    pub objects_removed: usize,
    pub warnings: Vec<String>,
}

/// A file that made it into object storage, with its signed URL.
struct UploadedFile {
    file_name: String,
    path: String,
    url: String,
}

/// Service for index workflows.
pub struct IndexService {
    indices: Arc<dyn IndexRepository>,
    documents: Arc<dyn DocumentRepository>,
    store: Arc<dyn ObjectStore>,
    vector: Arc<dyn VectorIndexClient>,
}

impl IndexService {
    /// Create a new index service with the given collaborators.
    pub fn new(
        indices: Arc<dyn IndexRepository>,
        documents: Arc<dyn DocumentRepository>,
        store: Arc<dyn ObjectStore>,
        vector: Arc<dyn VectorIndexClient>,
    ) -> Self {
        Self {
            indices,
            documents,
            store,
            vector,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Create-Index Workflow
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an index: upload files, insert rows, trigger remote ingestion.
    ///
    /// Failures before the ingestion call compensate (storage objects and any
    /// partially created rows are removed). An ingestion failure keeps
    /// everything in place, unsynced.
    pub async fn create_index(
        &self,
        req: CreateIndexRequest,
    ) -> Result<CreateIndexOutcome, CoreError> {
        let name = req.index_name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::field_validation(
                "index_name",
                "Index name is required",
            ));
        }
        if req.roles.is_empty() {
            return Err(CoreError::field_validation(
                "roles",
                "Please select at least one role",
            ));
        }
        if req.files.is_empty() {
            return Err(CoreError::field_validation(
                "files",
                "Please upload at least one document",
            ));
        }
        match self.indices.get_by_name(&name).await {
            Ok(_) => {
                return Err(CoreError::field_validation(
                    "index_name",
                    format!("An index named '{name}' already exists"),
                ));
            }
            Err(RepositoryError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        tracing::info!(index = %name, files = req.files.len(), "starting index creation");

        let uploaded = self.upload_all(&name, &req.files).await?;

        let index = match self
            .indices
            .insert(&NewDocIndex {
                index_name: name.clone(),
                roles_allowed: join_roles(&req.roles),
                synced: false,
            })
            .await
        {
            Ok(index) => index,
            Err(e) => {
                self.rollback_storage(&uploaded_paths(&uploaded)).await;
                return Err(e.into());
            }
        };

        let new_documents: Vec<NewIndexDocument> = uploaded
            .iter()
            .map(|file| NewIndexDocument {
                index_id: index.id,
                file_name: file.file_name.clone(),
                file_url: file.url.clone(),
                synced: false,
            })
            .collect();
        let documents = match self.documents.insert_many(&new_documents).await {
            Ok(documents) => documents,
            Err(e) => {
                self.rollback_storage(&uploaded_paths(&uploaded)).await;
                if let Err(delete_err) = self.indices.delete(index.id).await {
                    tracing::warn!(index = %name, error = %delete_err,
                        "failed to remove index row during rollback");
                }
                return Err(e.into());
            }
        };

        let urls: Vec<String> = uploaded.iter().map(|file| file.url.clone()).collect();
        if let Err(e) = self.vector.create_index(&name, &urls).await {
            tracing::warn!(index = %name, error = %e,
                "ingestion failed; keeping index and documents unsynced");
            return Ok(CreateIndexOutcome {
                index,
                documents,
                synced: false,
            });
        }

        // Ingestion succeeded, so all three systems hold the data. A failure
        // flipping the flags only loses the bookkeeping; report the partial
        // state instead of failing the whole request.
        if let Err(e) = self.mark_index_synced(index.id).await {
            tracing::warn!(index = %name, error = %e,
                "ingestion succeeded but sync flag update failed; index will show as unsynced");
            return Ok(CreateIndexOutcome {
                index,
                documents,
                synced: false,
            });
        }

        let index = self.indices.get_by_id(index.id).await?;
        let documents = self.documents.list_for_index(index.id).await?;
        tracing::info!(index = %index.index_name, "index created and ingested");
        Ok(CreateIndexOutcome {
            index,
            documents,
            synced: true,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Add-to-Index Workflow
    // ─────────────────────────────────────────────────────────────────────────

    /// Add documents to an existing, synced index.
    ///
    /// The index must appear in the vector service's listing and be marked
    /// synced locally. Any ingestion failure fails the whole operation and
    /// removes the storage objects and document rows this call created.
    pub async fn add_documents(
        &self,
        index_name: &str,
        files: Vec<UploadFile>,
    ) -> Result<Vec<IndexDocument>, CoreError> {
        if files.is_empty() {
            return Err(CoreError::field_validation(
                "files",
                "Please upload at least one document",
            ));
        }

        let listing = self.vector.list_indices().await?;
        if !listing.iter().any(|candidate| candidate == index_name) {
            return Err(CoreError::field_validation(
                "index_name",
                format!("Index '{index_name}' not found in the vector service. Create the index first."),
            ));
        }

        let index = match self.indices.get_by_name(index_name).await {
            Ok(index) => index,
            Err(RepositoryError::NotFound(_)) => {
                return Err(CoreError::field_validation(
                    "index_name",
                    format!("Index '{index_name}' not found in the database"),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        if !index.synced {
            return Err(CoreError::field_validation(
                "index_name",
                format!("Index '{index_name}' is not synchronized with the vector service yet"),
            ));
        }

        tracing::info!(index = %index_name, files = files.len(), "adding documents to index");

        let uploaded = self.upload_all(index_name, &files).await?;

        let new_documents: Vec<NewIndexDocument> = uploaded
            .iter()
            .map(|file| NewIndexDocument {
                index_id: index.id,
                file_name: file.file_name.clone(),
                file_url: file.url.clone(),
                synced: false,
            })
            .collect();
        let mut documents = match self.documents.insert_many(&new_documents).await {
            Ok(documents) => documents,
            Err(e) => {
                self.rollback_storage(&uploaded_paths(&uploaded)).await;
                return Err(e.into());
            }
        };

        for document in &documents {
            if let Err(e) = self
                .vector
                .add_document(index_name, &document.file_url)
                .await
            {
                tracing::warn!(index = %index_name, file = %document.file_name, error = %e,
                    "ingestion failed; rolling back this request");
                self.rollback_storage(&uploaded_paths(&uploaded)).await;
                let ids: Vec<i64> = documents.iter().map(|d| d.id).collect();
                if let Err(delete_err) = self.documents.delete_many(&ids).await {
                    tracing::warn!(index = %index_name, error = %delete_err,
                        "failed to remove document rows during rollback");
                }
                return Err(e.into());
            }
            self.documents.set_synced(document.id, true).await?;
        }

        for document in &mut documents {
            document.synced = true;
        }
        tracing::info!(index = %index_name, added = documents.len(), "documents added");
        Ok(documents)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete-Index Workflow
    // ─────────────────────────────────────────────────────────────────────────

    /// Delete an index across all three systems.
    ///
    /// The external removal must succeed or the whole workflow aborts with
    /// nothing local touched. The database and storage stages then run
    /// best-effort and independently; their failures become report warnings.
    pub async fn delete_index(&self, index_name: &str) -> Result<DeleteIndexReport, CoreError> {
        tracing::info!(index = %index_name, "starting index deletion");
        self.vector.remove_index(index_name).await?;

        let mut report = DeleteIndexReport {
            index_name: index_name.to_string(),
            db_row_deleted: false,
            objects_removed: 0,
            warnings: Vec::new(),
        };

        match self.indices.get_by_name(index_name).await {
            Ok(index) => match self.indices.delete(index.id).await {
                Ok(()) => {
                    report.db_row_deleted = true;
                    tracing::info!(index = %index_name, "database row deleted (cascade)");
                }
                Err(e) => {
                    tracing::warn!(index = %index_name, error = %e, "database deletion failed");
                    report
                        .warnings
                        .push(format!("Failed to delete database row: {e}"));
                }
            },
            Err(RepositoryError::NotFound(_)) => {
                tracing::info!(index = %index_name, "no database record found, skipping");
                report
                    .warnings
                    .push("No database record found for index; skipped database deletion".into());
            }
            Err(e) => {
                report
                    .warnings
                    .push(format!("Failed to look up index row: {e}"));
            }
        }

        match self.store.list(index_name).await {
            Ok(objects) => {
                if !objects.is_empty() {
                    let paths: Vec<String> = objects
                        .iter()
                        .map(|object| format!("{index_name}/{}", object.name))
                        .collect();
                    match self.store.remove(&paths).await {
                        Ok(()) => {
                            report.objects_removed = paths.len();
                            tracing::info!(index = %index_name, count = paths.len(),
                                "storage objects deleted");
                        }
                        Err(e) => {
                            tracing::warn!(index = %index_name, error = %e,
                                "storage file deletion failed");
                            report
                                .warnings
                                .push(format!("Failed to delete storage files: {e}"));
                        }
                    }
                }
                // The now-empty folder marker; its failure is only a warning.
                if let Err(e) = self.store.remove(&[format!("{index_name}/")]).await {
                    tracing::warn!(index = %index_name, error = %e,
                        "folder marker deletion failed");
                }
            }
            Err(e) => {
                tracing::warn!(index = %index_name, error = %e, "storage listing failed");
                report
                    .warnings
                    .push(format!("Failed to list storage files: {e}"));
            }
        }

        match self.store.list(index_name).await {
            Ok(remaining) if !remaining.is_empty() => {
                tracing::warn!(index = %index_name, remaining = remaining.len(),
                    "files remain in storage after cleanup");
                report.warnings.push(format!(
                    "{} file(s) may remain in storage; check manually",
                    remaining.len()
                ));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(index = %index_name, error = %e, "post-delete verification failed");
            }
        }

        Ok(report)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read Views
    // ─────────────────────────────────────────────────────────────────────────

    /// List all indices with their documents and derived sync status.
    pub async fn list_overviews(&self) -> Result<Vec<IndexOverview>, CoreError> {
        let indices = self.indices.list().await?;
        let mut overviews = Vec::with_capacity(indices.len());
        for index in indices {
            let documents = self.documents.list_for_index(index.id).await?;
            let sync_status =
                SyncStatus::derive(index.synced, documents.iter().map(|d| &d.synced));
            overviews.push(IndexOverview {
                index,
                documents,
                sync_status,
            });
        }
        Ok(overviews)
    }

    /// Fetch one index with its documents, for the file-info view.
    pub async fn get_overview(&self, index_name: &str) -> Result<IndexOverview, CoreError> {
        let index = self.indices.get_by_name(index_name).await?;
        let documents = self.documents.list_for_index(index.id).await?;
        let sync_status = SyncStatus::derive(index.synced, documents.iter().map(|d| &d.synced));
        Ok(IndexOverview {
            index,
            documents,
            sync_status,
        })
    }

    /// The index list's "retry sync" button.
    ///
    /// TODO: drive a real re-ingestion through the vector client using the
    /// stored signed URLs. Until then this only re-derives the stored status
    /// after the fixed delay the UI shows a spinner for.
    pub async fn retry_sync(&self, index_name: &str) -> Result<SyncStatus, CoreError> {
        let index = self.indices.get_by_name(index_name).await?;
        tokio::time::sleep(RETRY_SYNC_DELAY).await;
        let documents = self.documents.list_for_index(index.id).await?;
        Ok(SyncStatus::derive(
            index.synced,
            documents.iter().map(|d| &d.synced),
        ))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Upload every file and sign a long-lived URL for each. On any failure
    /// the objects already uploaded by this call are removed again.
    async fn upload_all(
        &self,
        index_name: &str,
        files: &[UploadFile],
    ) -> Result<Vec<UploadedFile>, CoreError> {
        let mut uploaded: Vec<UploadedFile> = Vec::with_capacity(files.len());
        for file in files {
            let path = file.storage_path(index_name);
            tracing::debug!(path = %path, bytes = file.bytes.len(), "uploading document");
            if let Err(e) = self
                .store
                .upload(&path, file.bytes.clone(), &file.content_type)
                .await
            {
                self.rollback_storage(&uploaded_paths(&uploaded)).await;
                return Err(e.into());
            }
            match self.store.signed_url(&path, SIGNED_URL_TTL_SECS).await {
                Ok(url) => uploaded.push(UploadedFile {
                    file_name: file.file_name.clone(),
                    path,
                    url,
                }),
                Err(e) => {
                    let mut paths = uploaded_paths(&uploaded);
                    paths.push(path);
                    self.rollback_storage(&paths).await;
                    return Err(e.into());
                }
            }
        }
        Ok(uploaded)
    }

    /// Flip the sync flag on an index and all of its documents.
    async fn mark_index_synced(&self, index_id: i64) -> Result<(), RepositoryError> {
        self.indices.set_synced(index_id, true).await?;
        self.documents.set_synced_for_index(index_id, true).await
    }

    /// Remove storage objects created by a failed request. Rollback failures
    /// are logged, never propagated; the original error stays primary.
    async fn rollback_storage(&self, paths: &[String]) {
        if paths.is_empty() {
            return;
        }
        tracing::info!(count = paths.len(), "rolling back storage uploads");
        if let Err(e) = self.store.remove(paths).await {
            tracing::warn!(error = %e,
                "storage rollback failed; objects may need manual deletion");
        }
    }
}

fn uploaded_paths(uploaded: &[UploadedFile]) -> Vec<String> {
    uploaded.iter().map(|file| file.path.clone()).collect()
}
