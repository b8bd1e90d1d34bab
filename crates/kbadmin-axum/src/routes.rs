//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the workflow services in `kbadmin-core`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Body limit for the document upload routes. Axum's 2 MB default is far
/// below a routine PDF.
const UPLOAD_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
///
/// Returns a router typed as `Router<AppState>` but WITHOUT `.with_state()`
/// applied. The caller must apply `.with_state()` before nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    // Indices API; the create and add-documents routes receive whole
    // documents as multipart bodies, so they get a raised body limit.
    let indices = Router::new()
        .route(
            "/indices",
            get(handlers::indices::list).post(handlers::indices::create),
        )
        .route("/indices/{name}", delete(handlers::indices::remove))
        .route(
            "/indices/{name}/documents",
            get(handlers::indices::list_documents).post(handlers::indices::add_documents),
        )
        .route(
            "/indices/{name}/retry-sync",
            post(handlers::indices::retry_sync),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    // Search templates API
    let templates = Router::new()
        .route(
            "/templates",
            get(handlers::templates::list).post(handlers::templates::create),
        )
        .route(
            "/templates/{id}",
            axum::routing::put(handlers::templates::update).delete(handlers::templates::remove),
        );

    indices.merge(templates)
}

/// Create the main Axum router with all API routes.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{name}`, `{id}`
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
