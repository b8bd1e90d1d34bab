//! CLI entry point - the composition root.
//!
//! Parses arguments and environment, builds the server configuration, and
//! hands off to `kbadmin-axum`. All infrastructure wiring happens inside
//! the web adapter's bootstrap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kbadmin_axum::{start_server, CorsConfig, ServerConfig};
use kbadmin_storage::StorageConfig;
use kbadmin_vector::VectorApiConfig;

/// Command-line interface for the knowledge-base admin service.
#[derive(Parser)]
#[command(name = "kbadmin")]
#[command(about = "Administer LLM document indices, storage, and search templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the admin web server
    Serve {
        /// Port for the HTTP server
        #[arg(long, env = "KBADMIN_PORT", default_value_t = 8080)]
        port: u16,

        /// Path to the SQLite database file
        #[arg(long, env = "KBADMIN_DB_PATH", default_value = "kbadmin.db")]
        db_path: PathBuf,

        /// Base URL of the object-storage API (the segment before /object/...)
        #[arg(long, env = "KBADMIN_STORAGE_URL")]
        storage_url: String,

        /// Service key for object storage, sent as a bearer token
        #[arg(long, env = "KBADMIN_STORAGE_KEY")]
        storage_key: Option<String>,

        /// Storage bucket holding all index documents
        #[arg(long, env = "KBADMIN_BUCKET", default_value = "llm_docs")]
        bucket: String,

        /// Base URL of the vector-index service
        #[arg(long, env = "KBADMIN_VECTOR_URL")]
        vector_url: String,

        /// Authorization header value for the vector-index service
        #[arg(long, env = "KBADMIN_VECTOR_KEY")]
        vector_key: Option<String>,

        /// Restrict CORS to these origins (comma-separated); all origins
        /// are allowed when omitted
        #[arg(long, env = "KBADMIN_ALLOWED_ORIGINS", value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve {
            port,
            db_path,
            storage_url,
            storage_key,
            bucket,
            vector_url,
            vector_key,
            allowed_origins,
        } => {
            let cors = if allowed_origins.is_empty() {
                CorsConfig::AllowAll
            } else {
                CorsConfig::AllowOrigins(allowed_origins)
            };

            let config = ServerConfig {
                port,
                db_path,
                storage: StorageConfig::new(storage_url)
                    .with_optional_service_key(storage_key)
                    .with_bucket(bucket),
                vector: VectorApiConfig::new(vector_url).with_optional_api_key(vector_key),
                cors,
            };

            start_server(config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::parse_from([
            "kbadmin",
            "serve",
            "--port",
            "9000",
            "--storage-url",
            "https://project.example.co/storage/v1",
            "--vector-url",
            "https://vectors.internal.example",
            "--allowed-origins",
            "https://admin.example.com,https://staging.example.com",
        ]);
        let Some(Commands::Serve {
            port,
            bucket,
            allowed_origins,
            ..
        }) = cli.command
        else {
            panic!("expected serve command");
        };
        assert_eq!(port, 9000);
        assert_eq!(bucket, "llm_docs");
        assert_eq!(allowed_origins.len(), 2);
    }
}
