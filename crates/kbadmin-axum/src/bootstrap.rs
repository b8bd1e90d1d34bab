//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use kbadmin_core::{IndexService, TemplateService};
use kbadmin_db::{setup_database, CoreFactory};
use kbadmin_storage::{StorageClient, StorageConfig};
use kbadmin_vector::{DefaultVectorClient, VectorApiConfig};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
    /// Object-storage client configuration.
    pub storage: StorageConfig,
    /// Vector-index client configuration.
    pub vector: VectorApiConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
pub struct AxumContext {
    /// Index workflow service.
    pub indices: Arc<IndexService>,
    /// Search template service.
    pub templates: Arc<TemplateService>,
}

impl AxumContext {
    /// Assemble a context from already-built services. Tests use this to
    /// inject fakes.
    pub fn new(indices: Arc<IndexService>, templates: Arc<TemplateService>) -> Self {
        Self { indices, templates }
    }
}

/// Bootstrap the Axum server with all services.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        db_path = %config.db_path.display(),
        "bootstrapping kbadmin web server"
    );

    // 1. Create database pool with full schema setup
    let pool = setup_database(&config.db_path).await?;
    let repos = CoreFactory::build_repos(pool);

    // 2. External collaborators
    let store = Arc::new(StorageClient::from_config(&config.storage)?);
    let vector = Arc::new(DefaultVectorClient::from_config(&config.vector)?);

    // 3. Workflow services
    let indices = Arc::new(IndexService::new(
        repos.indices.clone(),
        repos.documents.clone(),
        store,
        vector,
    ));
    let templates = Arc::new(TemplateService::new(repos.templates));

    Ok(AxumContext::new(indices, templates))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("kbadmin web server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
