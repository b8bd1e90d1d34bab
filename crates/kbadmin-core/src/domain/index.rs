//! Index domain types.
//!
//! These types represent document indices in the system, independent of
//! any infrastructure concerns (database, object storage, vector service).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expiry for signed document URLs: one year, in seconds.
///
/// Documents are ingested by URL, so the URL has to outlive any plausible
/// reprocessing window.
pub const SIGNED_URL_TTL_SECS: u64 = 31_536_000;

/// Join a role selection into the comma-joined form stored in the database.
pub fn join_roles(roles: &[String]) -> String {
    roles.join(", ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Types
// ─────────────────────────────────────────────────────────────────────────────

/// A document index that exists in the system with a database ID.
///
/// Use `NewDocIndex` for indices that haven't been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocIndex {
    /// Database ID of the index.
    pub id: i64,
    /// Unique, human-chosen index name. Doubles as the storage folder name
    /// and the name the vector service knows the index by.
    pub index_name: String,
    /// Comma-joined list of roles allowed to query this index.
    pub roles_allowed: String,
    /// Whether the index has been reflected in the vector service.
    pub synced: bool,
    /// UTC timestamp of when the index row was created.
    pub created_at: DateTime<Utc>,
    /// UTC timestamp of the last update, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

/// An index to be inserted into the system (no ID yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocIndex {
    pub index_name: String,
    pub roles_allowed: String,
    /// Always false at creation time; flipped after successful ingestion.
    pub synced: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Types
// ─────────────────────────────────────────────────────────────────────────────

/// A document belonging to an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Database ID of the document.
    pub id: i64,
    /// ID of the owning index.
    pub index_id: i64,
    /// Original file name.
    pub file_name: String,
    /// Long-lived signed URL for the stored object.
    pub file_url: String,
    /// Whether this document has been ingested by the vector service.
    pub synced: bool,
    /// UTC timestamp of when the document row was created.
    pub created_at: DateTime<Utc>,
}

/// A document to be inserted alongside its storage upload (no ID yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIndexDocument {
    pub index_id: i64,
    pub file_name: String,
    pub file_url: String,
    pub synced: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Derived / Workflow Types
// ─────────────────────────────────────────────────────────────────────────────

/// Derived sync status for an index, as shown in the index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Synced,
    NotSynced,
}

impl SyncStatus {
    /// Derive the status label: synced only if the index flag and every
    /// document flag are true. An index with no documents follows its own flag.
    pub fn derive<'a, I>(index_synced: bool, document_flags: I) -> Self
    where
        I: IntoIterator<Item = &'a bool>,
    {
        if index_synced && document_flags.into_iter().all(|synced| *synced) {
            Self::Synced
        } else {
            Self::NotSynced
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Synced => write!(f, "Synced"),
            Self::NotSynced => write!(f, "Not Synced"),
        }
    }
}

/// An index together with its documents and derived status, for the
/// show-indices view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexOverview {
    pub index: DocIndex,
    pub documents: Vec<IndexDocument>,
    pub sync_status: SyncStatus,
}

/// A file submitted through one of the upload workflows.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Storage path for this file under the given index: `{index}/{file}`.
    pub fn storage_path(&self, index_name: &str) -> String {
        format!("{}/{}", index_name, self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_status_requires_index_and_all_documents() {
        assert_eq!(SyncStatus::derive(true, &[true, true]), SyncStatus::Synced);
        assert_eq!(
            SyncStatus::derive(true, &[true, false]),
            SyncStatus::NotSynced
        );
        assert_eq!(SyncStatus::derive(false, &[true]), SyncStatus::NotSynced);
    }

    #[test]
    fn sync_status_with_no_documents_follows_index_flag() {
        assert_eq!(SyncStatus::derive(true, &[]), SyncStatus::Synced);
        assert_eq!(SyncStatus::derive(false, &[]), SyncStatus::NotSynced);
    }

    #[test]
    fn storage_path_is_keyed_by_index_name() {
        let file = UploadFile {
            file_name: "policy.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![],
        };
        assert_eq!(file.storage_path("handbook"), "handbook/policy.pdf");
    }

    #[test]
    fn roles_join_with_comma_space() {
        let roles = vec!["Admin".to_string(), "Art Team".to_string()];
        assert_eq!(join_roles(&roles), "Admin, Art Team");
    }
}
