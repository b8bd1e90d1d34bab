//! Core domain for the knowledge-base admin service.
//!
//! This crate holds the domain types, the port traits for the three external
//! collaborators (relational database, object storage, vector-index service),
//! and the workflow services that sequence them. It has no dependency on any
//! concrete database driver, HTTP client, or web framework; those live in the
//! adapter crates (`kbadmin-db`, `kbadmin-storage`, `kbadmin-vector`,
//! `kbadmin-axum`).

pub mod domain;
pub mod ports;
pub mod services;

pub use domain::{
    join_roles, DocIndex, IndexDocument, IndexOverview, NewDocIndex, NewIndexDocument,
    NewSearchTemplate, SearchTemplate, SyncStatus, UploadFile, SIGNED_URL_TTL_SECS,
};
pub use ports::{
    CoreError, DocumentRepository, IndexRepository, ObjectStore, Repos, RepositoryError,
    StoreError, StoredObject, TemplateRepository, VectorApiError, VectorIndexClient,
};
pub use services::{
    CreateIndexOutcome, CreateIndexRequest, DeleteIndexReport, IndexService, TemplateDraft,
    TemplateService,
};
