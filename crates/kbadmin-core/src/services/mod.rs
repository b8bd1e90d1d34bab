//! Workflow services that orchestrate ports.
//!
//! Services hold `Arc<dyn Port>` collaborators and contain all sequencing,
//! validation, and compensation logic. Adapters stay thin.

pub mod index_service;
pub mod template_service;

pub use index_service::{CreateIndexOutcome, CreateIndexRequest, DeleteIndexReport, IndexService};
pub use template_service::{TemplateDraft, TemplateService};
