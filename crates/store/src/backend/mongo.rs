use crate::{Document, DocumentStore, Filter, StoreError, ID_FIELD};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson};
use mongodb::error::ErrorKind;
use mongodb::options::FindOptions;
use mongodb::{Client, Database};

/// Document store backed by a MongoDB database.
///
/// The driver keeps its own connection pool, so a single `MongoStore` is
/// shared by every request handler.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parse `uri` and bind a client to `database`. No round-trip to the
    /// server happens until the first operation.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(StoreError::unavailable)?;
        tracing::debug!(database, "mongo client created");
        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<bson::Document> {
        self.db.collection::<bson::Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        let mut document = bson::to_document(&doc)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        document.remove(ID_FIELD);

        let result = self.collection(collection).insert_one(document, None).await?;
        Ok(id_to_string(result.inserted_id))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError> {
        let options = FindOptions::builder()
            .limit((limit > 0).then_some(i64::from(limit)))
            .build();
        let mut cursor = self
            .collection(collection)
            .find(filter.to_mongo(), options)
            .await?;

        let mut docs = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            docs.push(into_json(doc));
        }
        Ok(docs)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.db.list_collection_names(None).await?)
    }

    fn name(&self) -> &str {
        self.db.name()
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

/// Convert a BSON document to JSON, normalizing the identifier to a string.
fn into_json(doc: bson::Document) -> Document {
    doc.into_iter()
        .map(|(key, value)| {
            let value = if key == ID_FIELD {
                serde_json::Value::String(id_to_string(value))
            } else {
                value.into_relaxed_extjson()
            };
            (key, value)
        })
        .collect()
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn object_ids_become_hex_strings() {
        let oid = ObjectId::new();
        let converted = into_json(doc! {
            "_id": oid,
            "name": "Chuck 70 High",
            "sizes": [5_i64, 6_i64],
            "price": 74.99,
            "in_stock": true,
        });

        assert_eq!(converted["_id"], json!(oid.to_hex()));
        assert_eq!(converted["name"], json!("Chuck 70 High"));
        assert_eq!(converted["sizes"], json!([5, 6]));
        assert_eq!(converted["price"], json!(74.99));
        assert_eq!(converted["in_stock"], json!(true));
    }

    #[test]
    fn non_object_ids_are_stringified() {
        assert_eq!(id_to_string(Bson::String("abc".into())), "abc");
        assert_eq!(id_to_string(Bson::Int64(7)), "7");
    }

    #[tokio::test]
    async fn malformed_uri_is_unavailable() {
        let err = MongoStore::connect("not-a-uri", "shoestore")
            .await
            .err()
            .expect("connect should fail");
        assert!(err.is_unavailable());
    }
}
