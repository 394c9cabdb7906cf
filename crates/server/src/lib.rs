//! Shoestore Server - HTTP REST API for the shoe product catalog
//!
//! This crate exposes the catalog over HTTP with JSON bodies.
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
//! - `GET /` - Service banner
//! - `GET /health` - Liveness probe
//! - `GET /test` - Store connectivity and environment diagnostics
//! - `GET /api/hello` - Greeting
//! - `GET /api/shoes?q=&brand=&limit=` - List and search shoes
//! - `POST /api/shoes` - Create a shoe
//!
//! # Configuration
//!
//! `DATABASE_URL` and `DATABASE_NAME` select the MongoDB deployment. Other
//! settings come from an optional `server` config file and
//! `SHOESTORE_SERVER__*` environment variables; `PORT` overrides the port.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
