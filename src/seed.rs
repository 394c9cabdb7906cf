//! One-time population of an empty collection with sample records.

use std::sync::atomic::{AtomicBool, Ordering};

use store::{DocumentStore, Filter, StoreError};
use tokio::sync::Mutex;

use crate::product::Shoe;

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// A previous call in this process already confirmed the collection.
    AlreadySeeded,
    /// The collection held at least one record; nothing was written.
    Existing,
    /// The collection was empty and the samples were inserted.
    Seeded { inserted: usize, failed: usize },
}

/// Inserts the sample set into an empty collection at most once.
///
/// Once any record exists the guard never writes, whether or not that
/// record is a sample. Checks within one process are serialized, so two
/// concurrent first listings cannot both seed. Separate processes sharing a
/// database can still race; nothing at the store level prevents it.
pub struct SeedGuard {
    collection: String,
    samples: Vec<Shoe>,
    confirmed: AtomicBool,
    lock: Mutex<()>,
}

impl SeedGuard {
    pub fn new(collection: impl Into<String>, samples: Vec<Shoe>) -> Self {
        Self {
            collection: collection.into(),
            samples,
            confirmed: AtomicBool::new(false),
            lock: Mutex::new(()),
        }
    }

    /// True once the collection has been observed non-empty or at least one
    /// sample has been written.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed.load(Ordering::Acquire)
    }

    /// Seed the collection if it is empty.
    ///
    /// A failing existence check returns the error without writing and
    /// leaves the guard unconfirmed so a later call retries. Individual
    /// insert failures are counted and logged; they never abort the batch.
    /// A batch in which every insert failed also leaves the guard unconfirmed.
    pub async fn ensure_seeded(&self, store: &dyn DocumentStore) -> Result<SeedOutcome, StoreError> {
        if self.is_confirmed() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let _guard = self.lock.lock().await;
        if self.is_confirmed() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let existing = store.find(&self.collection, &Filter::all(), 1).await?;
        if !existing.is_empty() {
            self.confirmed.store(true, Ordering::Release);
            return Ok(SeedOutcome::Existing);
        }

        let mut inserted = 0;
        let mut failed = 0;
        for shoe in &self.samples {
            let result = match shoe.to_document() {
                Ok(doc) => store
                    .insert(&self.collection, doc)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            match result {
                Ok(id) => {
                    inserted += 1;
                    tracing::debug!(id = %id, name = %shoe.name, "seeded sample");
                }
                Err(error) => {
                    failed += 1;
                    tracing::warn!(name = %shoe.name, %error, "failed to seed sample");
                }
            }
        }

        // A batch that wrote nothing leaves the collection empty; check again next time.
        if inserted > 0 {
            self.confirmed.store(true, Ordering::Release);
        }
        tracing::info!(
            collection = %self.collection,
            inserted,
            failed,
            "seeded empty collection"
        );
        Ok(SeedOutcome::Seeded { inserted, failed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::sample_shoes;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use store::{Document, InMemoryStore};

    /// Wraps the in-memory store and fails every insert of a chosen name.
    struct FlakyStore {
        inner: InMemoryStore,
        reject: &'static str,
        finds: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
            if doc.get("name") == Some(&json!(self.reject)) {
                return Err(StoreError::query("duplicate key"));
            }
            self.inner.insert(collection, doc).await
        }

        async fn find(
            &self,
            collection: &str,
            filter: &Filter,
            limit: u32,
        ) -> Result<Vec<Document>, StoreError> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            self.inner.find(collection, filter, limit).await
        }

        async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
            self.inner.list_collection_names().await
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn empty_collection_is_seeded_once() {
        let store = InMemoryStore::new();
        let guard = SeedGuard::new("shoe", sample_shoes());

        let first = guard.ensure_seeded(&store).await.unwrap();
        assert_eq!(first, SeedOutcome::Seeded { inserted: 4, failed: 0 });
        assert_eq!(store.count("shoe"), 4);

        let second = guard.ensure_seeded(&store).await.unwrap();
        assert_eq!(second, SeedOutcome::AlreadySeeded);
        assert_eq!(store.count("shoe"), 4);
    }

    #[tokio::test]
    async fn any_existing_record_blocks_seeding() {
        let store = InMemoryStore::new();
        let doc = json!({ "name": "Custom", "brand": "Other" });
        store
            .insert("shoe", doc.as_object().cloned().unwrap())
            .await
            .unwrap();

        let guard = SeedGuard::new("shoe", sample_shoes());
        assert_eq!(guard.ensure_seeded(&store).await.unwrap(), SeedOutcome::Existing);
        assert_eq!(store.count("shoe"), 1);
    }

    #[tokio::test]
    async fn fresh_guard_respects_previous_seed() {
        let store = InMemoryStore::new();
        SeedGuard::new("shoe", sample_shoes())
            .ensure_seeded(&store)
            .await
            .unwrap();

        let restarted = SeedGuard::new("shoe", sample_shoes());
        assert_eq!(
            restarted.ensure_seeded(&store).await.unwrap(),
            SeedOutcome::Existing
        );
        assert_eq!(store.count("shoe"), 4);
    }

    #[tokio::test]
    async fn insert_failures_do_not_abort_batch() {
        let store = FlakyStore {
            inner: InMemoryStore::new(),
            reject: "Ultraboost 1.0",
            finds: AtomicUsize::new(0),
        };
        let guard = SeedGuard::new("shoe", sample_shoes());

        let outcome = guard.ensure_seeded(&store).await.unwrap();
        assert_eq!(outcome, SeedOutcome::Seeded { inserted: 3, failed: 1 });
        assert_eq!(store.inner.count("shoe"), 3);
    }

    /// Rejects every insert until `accept` is flipped.
    struct GatedStore {
        inner: InMemoryStore,
        accept: AtomicBool,
    }

    #[async_trait]
    impl DocumentStore for GatedStore {
        async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
            if !self.accept.load(Ordering::SeqCst) {
                return Err(StoreError::query("write rejected"));
            }
            self.inner.insert(collection, doc).await
        }

        async fn find(
            &self,
            collection: &str,
            filter: &Filter,
            limit: u32,
        ) -> Result<Vec<Document>, StoreError> {
            self.inner.find(collection, filter, limit).await
        }

        async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
            self.inner.list_collection_names().await
        }

        fn name(&self) -> &str {
            "gated"
        }
    }

    #[tokio::test]
    async fn batch_with_no_inserts_is_retried() {
        let store = GatedStore {
            inner: InMemoryStore::new(),
            accept: AtomicBool::new(false),
        };
        let guard = SeedGuard::new("shoe", sample_shoes());

        let first = guard.ensure_seeded(&store).await.unwrap();
        assert_eq!(first, SeedOutcome::Seeded { inserted: 0, failed: 4 });
        assert!(!guard.is_confirmed());
        assert_eq!(store.inner.count("shoe"), 0);

        store.accept.store(true, Ordering::SeqCst);
        let second = guard.ensure_seeded(&store).await.unwrap();
        assert_eq!(second, SeedOutcome::Seeded { inserted: 4, failed: 0 });
        assert!(guard.is_confirmed());
        assert_eq!(store.inner.count("shoe"), 4);

        assert_eq!(guard.ensure_seeded(&store).await.unwrap(), SeedOutcome::AlreadySeeded);
    }

    #[tokio::test]
    async fn unavailable_store_skips_and_retries_later() {
        let guard = SeedGuard::new("shoe", sample_shoes());
        let err = guard
            .ensure_seeded(&store::DisconnectedStore)
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
        assert!(!guard.is_confirmed());

        let store = InMemoryStore::new();
        assert!(matches!(
            guard.ensure_seeded(&store).await.unwrap(),
            SeedOutcome::Seeded { inserted: 4, .. }
        ));
    }

    #[tokio::test]
    async fn concurrent_first_calls_seed_once() {
        let store = Arc::new(FlakyStore {
            inner: InMemoryStore::new(),
            reject: "",
            finds: AtomicUsize::new(0),
        });
        let guard = Arc::new(SeedGuard::new("shoe", sample_shoes()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let guard = guard.clone();
            handles.push(tokio::spawn(async move {
                guard.ensure_seeded(store.as_ref()).await.unwrap()
            }));
        }
        let mut seeded = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), SeedOutcome::Seeded { .. }) {
                seeded += 1;
            }
        }

        assert_eq!(seeded, 1);
        assert_eq!(store.inner.count("shoe"), 4);
        assert_eq!(store.finds.load(Ordering::SeqCst), 1);
    }
}
