//! Shoe product catalog over a document store.
//!
//! This crate holds everything between the HTTP surface and the store
//! client: the [`Shoe`] record, the [`build_filter`] translation of search
//! parameters, the one-time [`SeedGuard`], and the [`Catalog`] service that
//! ties them together and reshapes stored documents for clients.
//!
//! ```
//! use std::sync::Arc;
//! use shoestore::{Catalog, CatalogConfig, ListQuery};
//! use store::InMemoryStore;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let catalog = Catalog::new(Arc::new(InMemoryStore::new()), CatalogConfig::default());
//!     let nike = ListQuery { brand: Some("nike".into()), ..Default::default() };
//!     let items = catalog.list(&nike).await;
//!     assert_eq!(items[0]["name"], "Air Zoom Runner");
//! });
//! ```

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod filter;
pub mod product;
pub mod seed;

pub use catalog::{Catalog, ListQuery, PUBLIC_ID_FIELD, shape_document};
pub use config::CatalogConfig;
pub use diagnostics::{Diagnostics, EnvPresence};
pub use filter::build_filter;
pub use product::{Shoe, sample_shoes};
pub use seed::{SeedGuard, SeedOutcome};

use thiserror::Error;

/// Errors produced by catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid shoe: {0}")]
    Invalid(String),

    #[error("{0}")]
    CreateFailed(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("invalid catalog config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

/// First `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
