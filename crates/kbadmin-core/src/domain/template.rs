//! Search template domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reusable search prompt template, independent of any index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTemplate {
    /// Database ID of the template.
    pub id: i64,
    /// Unique template name.
    pub template_name: String,
    /// Comma-joined list of roles the template is assigned to.
    pub roles_assigned: String,
    /// The prompt text itself.
    pub prompt_content: String,
    /// Operator who created the template.
    pub created_by: String,
    /// UTC timestamp of when the template was created.
    pub created_at: DateTime<Utc>,
    /// UTC timestamp of the last update, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A template to be inserted (no ID yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSearchTemplate {
    pub template_name: String,
    pub roles_assigned: String,
    pub prompt_content: String,
    pub created_by: String,
}
