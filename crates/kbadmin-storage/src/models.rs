//! Wire types for the storage API.

use serde::{Deserialize, Serialize};

/// Body of `POST /object/sign/{bucket}/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct SignRequest {
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
}

/// Response of a sign request. The URL comes back relative to the API root.
#[derive(Debug, Clone, Deserialize)]
pub struct SignResponse {
    #[serde(rename = "signedURL")]
    pub signed_url: String,
}

/// Body of `POST /object/list/{bucket}`.
#[derive(Debug, Clone, Serialize)]
pub struct ListRequest {
    pub prefix: String,
    pub limit: u32,
    pub offset: u32,
}

/// One entry in a listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListedObject {
    pub name: String,
    #[serde(default)]
    pub metadata: Option<ObjectMetadata>,
}

/// Per-object metadata the API may include.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectMetadata {
    #[serde(default)]
    pub size: Option<u64>,
}

/// Body of `DELETE /object/{bucket}`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveRequest {
    pub prefixes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_request_uses_camel_case_field() {
        let json = serde_json::to_value(SignRequest { expires_in: 3600 }).unwrap();
        assert_eq!(json["expiresIn"], 3600);
    }

    #[test]
    fn listed_object_tolerates_missing_metadata() {
        let parsed: ListedObject = serde_json::from_str(r#"{"name":"a.pdf"}"#).unwrap();
        assert_eq!(parsed.name, "a.pdf");
        assert!(parsed.metadata.is_none());
    }
}
