use crate::config::ServerConfig;
use shoestore::{Catalog, EnvPresence};
use std::sync::Arc;
use store::{DisconnectedStore, DocumentStore};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Catalog service (shared across requests)
    pub catalog: Arc<Catalog>,
}

impl ServerState {
    /// Create server state, building the store backend from the configuration.
    ///
    /// A backend that cannot be built is logged and replaced by a
    /// disconnected store so the server still starts; read endpoints then
    /// return empty results and diagnostics report the store as missing.
    pub async fn new(config: ServerConfig) -> Self {
        let backend = config.backend_config();
        let store: Arc<dyn DocumentStore> = match backend.build().await {
            Ok(store) => store,
            Err(err) => {
                tracing::error!(
                    backend = backend.kind(),
                    error = %err,
                    "failed to build store backend, continuing without a database"
                );
                Arc::new(DisconnectedStore)
            }
        };
        tracing::info!(backend = backend.kind(), database = store.name(), "store ready");
        Self::with_store(config, store)
    }

    /// Create server state around an existing store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        let catalog = Catalog::new(store, config.catalog.clone());
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }

    /// Database variable presence for diagnostics.
    pub fn env_presence(&self) -> EnvPresence {
        self.config.env_presence()
    }
}
