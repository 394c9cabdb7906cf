//! # Shoestore Document Store
//!
//! This crate provides a backend-agnostic client for the document database
//! that holds the product catalog. Documents are schema-flexible JSON objects
//! grouped into named collections.
//!
//! ## Core Features
//!
//! - **Pluggable Backends**: every backend implements the async
//!   [`DocumentStore`] trait. Out of the box it provides:
//!   - An in-memory backend for tests and local runs.
//!   - A MongoDB backend (enabled via the `backend-mongo` feature).
//!   - A disconnected backend that reports every call as unavailable, used
//!     when no database is configured.
//! - **Typed Filters**: queries are expressed as a [`Filter`] of [`Clause`]s
//!   and translated to each backend's native representation.
//!
//! ## Identifiers
//!
//! The store assigns every document an opaque identifier under the reserved
//! [`ID_FIELD`]. Backends normalize it to a string on read and strip it from
//! inbound documents on insert.
//!
//! ## Example Usage
//!
//! ```
//! use store::{Clause, DocumentStore, Filter, InMemoryStore};
//! use serde_json::json;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let store = InMemoryStore::new();
//!     let doc = json!({ "name": "Air Zoom Runner", "brand": "Nike" });
//!     let id = store
//!         .insert("shoe", doc.as_object().unwrap().clone())
//!         .await
//!         .unwrap();
//!
//!     let filter = Filter::new().with(Clause::field_contains("brand", "nike"));
//!     let found = store.find("shoe", &filter, 10).await.unwrap();
//!     assert_eq!(found.len(), 1);
//!     assert_eq!(found[0]["_id"], json!(id));
//! });
//! ```

mod backend;
mod query;

#[cfg(feature = "backend-mongo")]
pub use backend::MongoStore;
pub use backend::{BackendConfig, DisconnectedStore, InMemoryStore};
pub use query::{Clause, Filter};

use async_trait::async_trait;
use thiserror::Error;

/// Reserved field holding the store-assigned identifier.
pub const ID_FIELD: &str = "_id";

/// A schema-flexible document as stored in a collection.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Errors surfaced by document store operations.
///
/// `Unavailable` means the store could not be reached at all (or was never
/// configured); `Query` means the store answered but the operation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store operation failed: {0}")]
    Query(String),
    #[error("document serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn unavailable<E: std::fmt::Display>(err: E) -> Self {
        Self::Unavailable(err.to_string())
    }

    pub fn query<E: std::fmt::Display>(err: E) -> Self {
        Self::Query(err.to_string())
    }

    /// True when the failure means the store itself is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Client interface to a document database.
///
/// Implementations must be safe to share across request handlers; no
/// additional coordination is performed by callers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return the identifier the store assigned to it.
    /// Any inbound [`ID_FIELD`] is discarded.
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError>;

    /// Return at most `limit` documents matching `filter`. A `limit` of zero
    /// means no limit.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError>;

    /// Names of the collections currently present in the database.
    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;

    /// Database name this client is bound to.
    fn name(&self) -> &str;

    /// Whether a real backend is behind this client.
    fn is_configured(&self) -> bool {
        true
    }
}
