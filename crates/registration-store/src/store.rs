//! In-memory document collections with optional persistence.

use crate::error::StoreError;
use crate::file::{Backing, Snapshot};
use crate::types::{Document, StoreTimestamp, SERVER_TIMESTAMP_KEY};
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Length of store-assigned document identifiers.
const DOCUMENT_ID_LEN: usize = 20;

/// Document store: named collections of schemaless documents.
///
/// Identifiers and creation timestamps are assigned by the store.
/// Documents are never updated in place; the only operations are
/// create, read-all and delete-by-id.
#[derive(Clone)]
pub struct DocumentStore {
    collections: Arc<RwLock<Snapshot>>,
    backing: Arc<Backing>,
}

impl DocumentStore {
    /// Open a store on the given backing, loading any persisted documents.
    pub async fn open(backing: Backing) -> Result<Self, StoreError> {
        let snapshot = backing.load().await?;
        let documents: usize = snapshot.values().map(Vec::len).sum();
        info!(
            "Document store opened ({} collections, {} documents)",
            snapshot.len(),
            documents
        );

        Ok(Self {
            collections: Arc::new(RwLock::new(snapshot)),
            backing: Arc::new(backing),
        })
    }

    /// Memory-only store for tests or when persistence is disabled.
    pub fn memory() -> Self {
        Self {
            collections: Arc::new(RwLock::new(Snapshot::new())),
            backing: Arc::new(Backing::memory()),
        }
    }

    /// Create a new document in a collection.
    ///
    /// The store assigns the identifier, and any field set to the
    /// [`server_timestamp`](crate::server_timestamp) sentinel is replaced
    /// with the store clock.
    #[instrument(skip(self, fields))]
    pub async fn create(
        &self,
        collection: &str,
        mut fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let stamp = StoreTimestamp::now();
        for value in fields.values_mut() {
            if is_server_timestamp(value) {
                *value = serde_json::to_value(stamp)?;
            }
        }

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        let id = {
            let mut rng = rand::thread_rng();
            loop {
                let candidate = generate_id(&mut rng);
                if !documents.iter().any(|d| d.id == candidate) {
                    break candidate;
                }
            }
        };

        let document = Document {
            id: id.clone(),
            fields,
        };
        documents.push(document.clone());

        self.backing.save(&collections).await?;

        debug!(collection, document_id = %id, "Created document");
        Ok(document)
    }

    /// List every document in a collection, in creation order.
    ///
    /// An unknown or empty collection yields an empty list.
    #[instrument(skip(self))]
    pub async fn list(&self, collection: &str) -> Vec<Document> {
        let collections = self.collections.read().await;
        collections.get(collection).cloned().unwrap_or_default()
    }

    /// Delete a single document by identifier.
    #[instrument(skip(self))]
    pub async fn delete(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;

        let position = documents
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| not_found(collection, id))?;
        let removed = documents.remove(position);

        self.backing.save(&collections).await?;

        info!(collection, document_id = %id, "Deleted document");
        Ok(removed)
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map(Vec::len).unwrap_or(0)
    }
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .map(|o| o.contains_key(SERVER_TIMESTAMP_KEY))
        .unwrap_or(false)
}

fn generate_id<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let mut rng = rand::thread_rng();
        let id = generate_id(&mut rng);

        assert_eq!(id.len(), DOCUMENT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_is_server_timestamp() {
        assert!(is_server_timestamp(&crate::server_timestamp()));
        assert!(!is_server_timestamp(&Value::Bool(true)));
        assert!(!is_server_timestamp(&serde_json::json!({"seconds": 0})));
    }
}
