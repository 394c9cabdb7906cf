//! Catalog configuration.
//!
//! Embedded in the server configuration under the `catalog` key, so it can be
//! set from the `server` config file or from environment variables:
//!
//! ```yaml
//! catalog:
//!   collection: "shoe"
//!   default_limit: 50
//!   seed_samples: true
//! ```

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Settings for the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Collection holding product records.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Result count used when a listing request gives no limit.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Insert the sample shoes into an empty collection.
    #[serde(default = "default_true")]
    pub seed_samples: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            default_limit: default_limit(),
            seed_samples: default_true(),
        }
    }
}

impl CatalogConfig {
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_seed_samples(mut self, seed: bool) -> Self {
        self.seed_samples = seed;
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.collection.trim().is_empty() {
            return Err(CatalogError::Config("collection name must not be empty".into()));
        }
        Ok(())
    }
}

fn default_collection() -> String {
    "shoe".to_string()
}

fn default_limit() -> u32 {
    50
}

fn default_true() -> bool {
    true
}
