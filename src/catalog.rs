//! List, search and create over the shoe collection.

use std::sync::Arc;

use serde_json::Value;
use store::{Document, DocumentStore, ID_FIELD};

use crate::config::CatalogConfig;
use crate::diagnostics::{self, Diagnostics, EnvPresence};
use crate::filter::build_filter;
use crate::product::{Shoe, sample_shoes};
use crate::seed::{SeedGuard, SeedOutcome};
use crate::{CatalogError, truncate_chars};

/// Field under which identifiers are returned to clients.
pub const PUBLIC_ID_FIELD: &str = "id";

/// Characters of a store error kept in a create failure.
const MAX_FAILURE_CHARS: usize = 200;

/// Parameters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text term matched against name, description, brand and category.
    pub q: Option<String>,
    /// Brand term.
    pub brand: Option<String>,
    /// Maximum number of records; the configured default when absent.
    pub limit: Option<u32>,
}

/// The catalog service. Owns the store handle for the lifetime of the
/// process and is shared by every request handler.
pub struct Catalog {
    store: Arc<dyn DocumentStore>,
    config: CatalogConfig,
    seed: SeedGuard,
}

impl Catalog {
    pub fn new(store: Arc<dyn DocumentStore>, config: CatalogConfig) -> Self {
        let seed = SeedGuard::new(config.collection.clone(), sample_shoes());
        Self {
            store,
            config,
            seed,
        }
    }

    /// Seed the collection if it is empty and seeding is enabled. Store
    /// failures are logged and reported as `None`.
    pub async fn ensure_seeded(&self) -> Option<SeedOutcome> {
        if !self.config.seed_samples {
            return None;
        }
        match self.seed.ensure_seeded(self.store.as_ref()).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::warn!(error = %err, "skipping seed: store check failed");
                None
            }
        }
    }

    /// List records matching `query`, with identifiers exposed as `id`.
    ///
    /// Never fails: a store error degrades to an empty list.
    pub async fn list(&self, query: &ListQuery) -> Vec<Document> {
        self.ensure_seeded().await;

        let filter = build_filter(query.q.as_deref(), query.brand.as_deref());
        let limit = query.limit.unwrap_or(self.config.default_limit);
        match self.store.find(&self.config.collection, &filter, limit).await {
            Ok(docs) => docs.into_iter().map(shape_document).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "listing failed, returning no items");
                Vec::new()
            }
        }
    }

    /// Validate and insert a new record, returning its identifier.
    pub async fn create(&self, shoe: &Shoe) -> Result<String, CatalogError> {
        shoe.validate()?;
        let doc = shoe.to_document()?;
        let id = self
            .store
            .insert(&self.config.collection, doc)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, name = %shoe.name, "create failed");
                CatalogError::CreateFailed(truncate_chars(&err.to_string(), MAX_FAILURE_CHARS))
            })?;
        tracing::info!(id = %id, name = %shoe.name, brand = %shoe.brand, "created shoe");
        Ok(id)
    }

    /// Store connectivity report; see [`diagnostics::probe`].
    pub async fn diagnostics(&self, env: EnvPresence) -> Diagnostics {
        diagnostics::probe(self.store.as_ref(), env).await
    }
}

/// Move the reserved identifier to [`PUBLIC_ID_FIELD`] as a string.
pub fn shape_document(mut doc: Document) -> Document {
    if let Some(id) = doc.remove(ID_FIELD) {
        let id = match id {
            Value::String(s) => s,
            Value::Null => return doc,
            other => other.to_string(),
        };
        doc.insert(PUBLIC_ID_FIELD.to_string(), Value::String(id));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::{DisconnectedStore, InMemoryStore};

    fn catalog_with(store: Arc<dyn DocumentStore>) -> Catalog {
        Catalog::new(store, CatalogConfig::default())
    }

    fn new_shoe(name: &str, brand: &str) -> Shoe {
        serde_json::from_value(json!({
            "name": name,
            "brand": brand,
            "price": 42.0,
            "category": "Trail",
        }))
        .unwrap()
    }

    fn names(docs: &[Document]) -> Vec<&str> {
        docs.iter().filter_map(|d| d["name"].as_str()).collect()
    }

    #[test]
    fn shape_renames_identifier() {
        let doc = json!({ "_id": "abc", "name": "X" }).as_object().cloned().unwrap();
        let shaped = shape_document(doc);
        assert_eq!(shaped["id"], json!("abc"));
        assert!(!shaped.contains_key("_id"));

        let doc = json!({ "_id": 17, "name": "X" }).as_object().cloned().unwrap();
        assert_eq!(shape_document(doc)["id"], json!("17"));

        let doc = json!({ "name": "X" }).as_object().cloned().unwrap();
        assert!(!shape_document(doc).contains_key("id"));
    }

    #[tokio::test]
    async fn first_listing_returns_samples() {
        let catalog = catalog_with(Arc::new(InMemoryStore::new()));
        let items = catalog.list(&ListQuery::default()).await;

        assert_eq!(items.len(), 4);
        for item in &items {
            assert!(item["id"].is_string());
            assert!(!item.contains_key("_id"));
            let brand = item["brand"].as_str().unwrap();
            assert!(["Nike", "Adidas", "Reebok", "Converse"].contains(&brand));
        }

        assert_eq!(catalog.list(&ListQuery::default()).await.len(), 4);
    }

    #[tokio::test]
    async fn brand_filter_is_case_insensitive() {
        let catalog = catalog_with(Arc::new(InMemoryStore::new()));
        let query = ListQuery {
            brand: Some("nike".into()),
            ..Default::default()
        };
        assert_eq!(names(&catalog.list(&query).await), vec!["Air Zoom Runner"]);
    }

    #[tokio::test]
    async fn text_and_brand_must_both_match() {
        let catalog = catalog_with(Arc::new(InMemoryStore::new()));

        let query = ListQuery {
            q: Some("running".into()),
            ..Default::default()
        };
        assert_eq!(
            names(&catalog.list(&query).await),
            vec!["Air Zoom Runner", "Ultraboost 1.0"]
        );

        let query = ListQuery {
            q: Some("running".into()),
            brand: Some("adidas".into()),
            limit: None,
        };
        assert_eq!(names(&catalog.list(&query).await), vec!["Ultraboost 1.0"]);
    }

    #[tokio::test]
    async fn limit_caps_results() {
        let catalog = catalog_with(Arc::new(InMemoryStore::new()));
        let query = ListQuery {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(catalog.list(&query).await.len(), 2);
    }

    #[tokio::test]
    async fn created_record_is_searchable() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = catalog_with(store.clone());
        catalog.ensure_seeded().await;

        let id = catalog.create(&new_shoe("Test Shoe", "TestCo")).await.unwrap();
        assert!(!id.is_empty());

        let query = ListQuery {
            q: Some("testco".into()),
            ..Default::default()
        };
        let items = catalog.list(&query).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], json!(id));
        assert_eq!(store.count("shoe"), 5);
    }

    #[tokio::test]
    async fn create_into_empty_store_blocks_later_seeding() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = catalog_with(store.clone());
        catalog.create(&new_shoe("Only", "Solo")).await.unwrap();

        assert_eq!(catalog.list(&ListQuery::default()).await.len(), 1);
        assert_eq!(store.count("shoe"), 1);
    }

    #[tokio::test]
    async fn seeding_can_be_disabled() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Catalog::new(
            store.clone(),
            CatalogConfig::default().with_seed_samples(false),
        );
        assert!(catalog.list(&ListQuery::default()).await.is_empty());
        assert_eq!(store.count("shoe"), 0);
    }

    #[tokio::test]
    async fn unavailable_store_degrades() {
        let catalog = catalog_with(Arc::new(DisconnectedStore));
        assert!(catalog.list(&ListQuery::default()).await.is_empty());

        let err = catalog.create(&new_shoe("A", "B")).await.unwrap_err();
        assert!(matches!(err, CatalogError::CreateFailed(ref msg) if msg.contains("no database configured")));
    }

    #[tokio::test]
    async fn invalid_shoe_is_not_written() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = catalog_with(store.clone());
        let mut shoe = new_shoe("A", "B");
        shoe.price = -5.0;

        assert!(matches!(
            catalog.create(&shoe).await,
            Err(CatalogError::Invalid(_))
        ));
        assert_eq!(store.count("shoe"), 0);
    }
}
