use serde::{Deserialize, Serialize};
use shoestore::{CatalogConfig, EnvPresence};
use std::net::SocketAddr;
use std::time::Duration;
use store::BackendConfig;

/// Environment variable holding the database connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the database name.
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

/// Database name used when only the connection string is set.
pub const DEFAULT_DATABASE_NAME: &str = "shoestore";

/// Store selection when no database URL is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// MongoDB when `DATABASE_URL` is set, otherwise no store.
    #[default]
    Auto,
    /// Always use the in-memory store.
    Memory,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Store selection when no database URL is set
    #[serde(default)]
    pub store_backend: StoreBackend,

    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Database connection string, from `DATABASE_URL`. Never serialized.
    #[serde(skip)]
    pub database_url: Option<String>,

    /// Database name, from `DATABASE_NAME`.
    #[serde(skip)]
    pub database_name: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            store_backend: StoreBackend::default(),
            catalog: CatalogConfig::default(),
            database_url: None,
            database_name: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, config files and environment variables
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("SHOESTORE_SERVER").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        if let Some(port) = non_empty_var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {port:?}: {e}"))?;
        }
        config.database_url = non_empty_var(DATABASE_URL_VAR);
        config.database_name = non_empty_var(DATABASE_NAME_VAR);
        config.catalog.validate()?;

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Which database variables are set, without their values
    pub fn env_presence(&self) -> EnvPresence {
        EnvPresence {
            database_url: self.database_url.is_some(),
            database_name: self.database_name.is_some(),
        }
    }

    /// Store backend implied by the database settings
    pub fn backend_config(&self) -> BackendConfig {
        match (&self.database_url, self.store_backend) {
            (Some(uri), _) => {
                let database = self.database_name.clone().unwrap_or_else(|| {
                    tracing::warn!(
                        "{DATABASE_NAME_VAR} not set, using database '{DEFAULT_DATABASE_NAME}'"
                    );
                    DEFAULT_DATABASE_NAME.to_string()
                });
                BackendConfig::mongo(uri.clone(), database)
            }
            (None, StoreBackend::Memory) => BackendConfig::in_memory(),
            (None, StoreBackend::Auto) => BackendConfig::Disconnected,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size(), 1024 * 1024);
        assert!(cfg.enable_cors);
        assert_eq!(cfg.store_backend, StoreBackend::Auto);
        assert_eq!(cfg.catalog.default_limit, 50);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_backend_selection() {
        let mut cfg = ServerConfig::default();
        assert!(matches!(cfg.backend_config(), BackendConfig::Disconnected));

        cfg.store_backend = StoreBackend::Memory;
        assert!(matches!(cfg.backend_config(), BackendConfig::InMemory));

        cfg.database_url = Some("mongodb://localhost:27017".into());
        match cfg.backend_config() {
            BackendConfig::Mongo { uri, database } => {
                assert_eq!(uri, "mongodb://localhost:27017");
                assert_eq!(database, DEFAULT_DATABASE_NAME);
            }
            other => panic!("unexpected backend {other:?}"),
        }

        cfg.database_name = Some("catalog".into());
        assert!(matches!(
            cfg.backend_config(),
            BackendConfig::Mongo { ref database, .. } if database == "catalog"
        ));
    }

    #[test]
    fn test_env_presence_never_carries_values() {
        let mut cfg = ServerConfig::default();
        cfg.database_url = Some("mongodb://user:secret@db".into());
        let presence = cfg.env_presence();
        assert!(presence.database_url);
        assert!(!presence.database_name);

        let rendered = serde_json::to_string(&cfg).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
