//! Catalog Server - HTTP API over the file-backed product catalog
//!
//! This crate exposes the `catalog` library over HTTP:
//!
//! - **Product listing**: tag filtering with offset/limit pagination
//! - **Product CRUD**: get, create, update and delete single products
//! - **Static assets**: a landing page plus files from a public directory
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Landing page
//! - `GET /products?tag=&offset=&limit=` - List products
//! - `GET /products/{id}` - Get product by ID
//! - `POST /products` - Create product
//! - `PUT /products/{id}` - Update product
//! - `DELETE /products/{id}` - Delete product
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `GET /metadata` - Server version and uptime

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
