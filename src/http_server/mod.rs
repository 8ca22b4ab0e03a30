//! # HTTP Server Module
//!
//! Serves the catalog API over HTTP.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/books`, `/books/{id}` - Book CRUD

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
