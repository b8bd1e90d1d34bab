//! Wire types for the vector-index service API.
//!
//! The field names follow the service's JSON contract exactly
//! (`indexname`, not `index_name`).

use serde::{Deserialize, Serialize};

/// Body of `POST /create_kb`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateKbRequest {
    pub indexname: String,
    pub urls: Vec<String>,
}

/// Body of `POST /add_docs`. One document URL per call.
#[derive(Debug, Clone, Serialize)]
pub struct AddDocsRequest {
    pub indexname: String,
    pub url: String,
}

/// Body of `POST /remove_index`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveIndexRequest {
    pub indexname: String,
}

/// Response of `GET /list-index`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexListResponse {
    /// "OK" on success; anything else means the listing is unusable.
    pub status: String,
    #[serde(default)]
    pub indexlist: Vec<String>,
}
