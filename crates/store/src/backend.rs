use crate::{Document, DocumentStore, Filter, StoreError, ID_FIELD};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Configuration for selecting and building a backend.
///
/// # Example
/// ```
/// use store::BackendConfig;
///
/// // In-memory (for testing)
/// let config = BackendConfig::in_memory();
///
/// // MongoDB
/// let config = BackendConfig::mongo("mongodb://localhost:27017", "shoestore");
/// ```
#[derive(Clone, Debug, Default)]
pub enum BackendConfig {
    /// Use a MongoDB deployment reachable at `uri`, bound to `database`.
    ///
    /// Requires the `backend-mongo` feature (enabled by default).
    Mongo { uri: String, database: String },
    /// Keep documents in process memory. Nothing survives a restart.
    InMemory,
    /// No store configured. Every operation reports `Unavailable`.
    #[default]
    Disconnected,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn mongo<U: Into<String>, D: Into<String>>(uri: U, database: D) -> Self {
        BackendConfig::Mongo {
            uri: uri.into(),
            database: database.into(),
        }
    }

    /// Short label for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendConfig::Mongo { .. } => "mongo",
            BackendConfig::InMemory => "memory",
            BackendConfig::Disconnected => "disconnected",
        }
    }

    /// Build the backend described by this configuration.
    ///
    /// The MongoDB client connects lazily, so an unreachable server is only
    /// detected by the first operation. A malformed URI fails here with
    /// [`StoreError::Unavailable`].
    pub async fn build(&self) -> Result<Arc<dyn DocumentStore>, StoreError> {
        match self {
            BackendConfig::InMemory => Ok(Arc::new(InMemoryStore::new())),
            BackendConfig::Disconnected => Ok(Arc::new(DisconnectedStore)),
            BackendConfig::Mongo { uri, database } => {
                #[cfg(feature = "backend-mongo")]
                {
                    Ok(Arc::new(MongoStore::connect(uri, database).await?))
                }
                #[cfg(not(feature = "backend-mongo"))]
                {
                    let _ = (uri, database);
                    Err(StoreError::unavailable(
                        "mongo backend disabled at compile time",
                    ))
                }
            }
        }
    }
}

/// An in-memory backend keeping each collection as an insertion-ordered list.
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of documents currently held in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|guard| guard.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn assign_id(&self) -> String {
        // Same width as a MongoDB ObjectId hex string.
        format!("{:024x}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, collection: &str, mut doc: Document) -> Result<String, StoreError> {
        let id = self.assign_id();
        doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        self.collections
            .write()
            .map_err(|_| StoreError::query("poisoned lock"))?
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self
            .collections
            .read()
            .map_err(|_| StoreError::query("poisoned lock"))?;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        let limit = if limit == 0 {
            usize::MAX
        } else {
            limit as usize
        };
        Ok(docs
            .iter()
            .filter(|doc| filter.matches(doc))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let guard = self
            .collections
            .read()
            .map_err(|_| StoreError::query("poisoned lock"))?;
        let mut names: Vec<String> = guard.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Stand-in used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedStore;

const NOT_CONFIGURED: &str = "no database configured";

#[async_trait]
impl DocumentStore for DisconnectedStore {
    async fn insert(&self, _collection: &str, _doc: Document) -> Result<String, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    async fn find(
        &self,
        _collection: &str,
        _filter: &Filter,
        _limit: u32,
    ) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    fn name(&self) -> &str {
        ""
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// The MongoDB backend implementation.
#[cfg(feature = "backend-mongo")]
pub mod mongo;

#[cfg(feature = "backend-mongo")]
pub use mongo::MongoStore;
