//! Integration tests for the Axum web server.
//!
//! These tests verify that routes are correctly wired to handlers, running
//! against an in-memory database and in-process fakes for the two external
//! services.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use kbadmin_axum::bootstrap::{AxumContext, CorsConfig};
use kbadmin_axum::routes::create_router;
use kbadmin_core::{
    IndexService, ObjectStore, StoreError, StoredObject, TemplateService, VectorApiError,
    VectorIndexClient,
};
use kbadmin_db::TestDb;

// ── In-process fakes for the external services ──────────────────────────────

#[derive(Default)]
struct FakeStore {
    objects: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn upload(&self, path: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<(), StoreError> {
        self.objects.lock().unwrap().push(path.to_string());
        Ok(())
    }

    async fn signed_url(&self, path: &str, _expires_in_secs: u64) -> Result<String, StoreError> {
        Ok(format!("https://storage.test/sign/{path}?token=t"))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, StoreError> {
        let folder = format!("{prefix}/");
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter_map(|path| path.strip_prefix(&folder))
            .map(|name| StoredObject {
                name: name.to_string(),
                size: None,
            })
            .collect())
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StoreError> {
        self.objects
            .lock()
            .unwrap()
            .retain(|path| !paths.contains(path));
        Ok(())
    }
}

#[derive(Default)]
struct FakeVector {
    indices: Mutex<Vec<String>>,
}

#[async_trait]
impl VectorIndexClient for FakeVector {
    async fn create_index(
        &self,
        index_name: &str,
        _document_urls: &[String],
    ) -> Result<(), VectorApiError> {
        self.indices.lock().unwrap().push(index_name.to_string());
        Ok(())
    }

    async fn add_document(
        &self,
        _index_name: &str,
        _document_url: &str,
    ) -> Result<(), VectorApiError> {
        Ok(())
    }

    async fn list_indices(&self) -> Result<Vec<String>, VectorApiError> {
        Ok(self.indices.lock().unwrap().clone())
    }

    async fn remove_index(&self, index_name: &str) -> Result<(), VectorApiError> {
        self.indices
            .lock()
            .unwrap()
            .retain(|name| name != index_name);
        Ok(())
    }
}

async fn test_app() -> axum::Router {
    let db = TestDb::new().await.unwrap();
    let repos = db.repos();
    let indices = Arc::new(IndexService::new(
        repos.indices.clone(),
        repos.documents.clone(),
        Arc::new(FakeStore::default()),
        Arc::new(FakeVector::default()),
    ));
    let templates = Arc::new(TemplateService::new(repos.templates));
    create_router(
        AxumContext::new(indices, templates),
        &CorsConfig::AllowAll,
    )
}

/// Build a multipart create-index body with one file of arbitrary bytes.
fn multipart_body_with_file(
    index_name: &str,
    file_name: &str,
    content: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "kbadmin-test-boundary";
    let mut body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"index_name\"\r\n\r\n\
         {index_name}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"roles\"\r\n\r\n\
         Admin\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

/// Build a multipart create-index body with one PDF file.
fn multipart_body(index_name: &str) -> (String, String) {
    let boundary = "kbadmin-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"index_name\"\r\n\r\n\
         {index_name}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"roles\"\r\n\r\n\
         Admin, Analyst\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"policy.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.4 test\r\n\
         --{boundary}--\r\n"
    );
    (format!("multipart/form-data; boundary={boundary}"), body)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── Health and routing ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn nonexistent_route_returns_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ── Indices API ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn indices_endpoint_returns_empty_array() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/indices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"[]");
}

#[tokio::test]
async fn create_index_via_multipart_returns_synced_outcome() {
    let app = test_app().await;
    let (content_type, body) = multipart_body("handbook");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/indices")
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["synced"], true);
    assert_eq!(json["index"]["index_name"], "handbook");
    assert_eq!(json["index"]["roles_allowed"], "Admin, Analyst");
    assert_eq!(json["documents"][0]["file_name"], "policy.pdf");
}

#[tokio::test]
async fn create_index_accepts_multi_megabyte_upload() {
    let app = test_app().await;
    let content = vec![0x25u8; 3 * 1024 * 1024];
    let (content_type, body) = multipart_body_with_file("archive", "big-report.pdf", &content);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/indices")
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["synced"], true);
    assert_eq!(json["documents"][0]["file_name"], "big-report.pdf");
}

#[tokio::test]
async fn created_index_appears_in_listing_as_synced() {
    let app = test_app().await;
    let (content_type, body) = multipart_body("handbook");

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/indices")
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/indices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json[0]["index"]["index_name"], "handbook");
    assert_eq!(json[0]["sync_status"], "synced");
}

#[tokio::test]
async fn create_index_without_roles_is_a_field_error() {
    let app = test_app().await;
    let boundary = "kbadmin-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"index_name\"\r\n\r\n\
         handbook\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"a.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         data\r\n\
         --{boundary}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/indices")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["field"], "roles");
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn index_documents_endpoint_returns_overview() {
    let app = test_app().await;
    let (content_type, body) = multipart_body("handbook");

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/indices")
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/indices/handbook/documents")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["documents"][0]["file_name"], "policy.pdf");
}

#[tokio::test]
async fn delete_index_returns_cleanup_report() {
    let app = test_app().await;
    let (content_type, body) = multipart_body("handbook");

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/indices")
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/indices/handbook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["db_row_deleted"], true);
    assert_eq!(json["objects_removed"], 1);

    // The listing is empty again.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/indices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"[]");
}

// ── Templates API ───────────────────────────────────────────────────────────

#[tokio::test]
async fn template_crud_round_trip() {
    let app = test_app().await;
    let payload = r#"{
        "template_name": "quarterly",
        "roles": ["Admin"],
        "prompt_content": "Summarize the attached policy.",
        "created_by": "ops"
    }"#;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/templates")
                .header("content-type", "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["roles_assigned"], "Admin");

    // Update
    let update = r#"{
        "template_name": "annual",
        "roles": ["Admin", "Analyst"],
        "prompt_content": "Summarize the annual report."
    }"#;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/templates/{id}"))
                .header("content-type", "application/json")
                .body(Body::from(update))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["template_name"], "annual");
    assert_eq!(updated["created_by"], "ops");

    // Delete
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/templates/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_template_name_returns_conflict() {
    let app = test_app().await;
    let payload = r#"{
        "template_name": "quarterly",
        "roles": ["Admin"],
        "prompt_content": "Summarize."
    }"#;

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/templates")
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn deleting_missing_template_returns_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/templates/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
