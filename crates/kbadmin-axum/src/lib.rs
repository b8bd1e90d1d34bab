//! Axum web adapter for kbadmin.
//!
//! Exposes the index and search-template workflows as a JSON API under
//! `/api`, plus a `/health` endpoint. The composition root in
//! [`bootstrap`] wires the `SQLite` repositories and the two external
//! HTTP clients into the core services.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::{bootstrap, start_server, AxumContext, CorsConfig, ServerConfig};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
