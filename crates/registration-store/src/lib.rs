//! Document storage for event registrations.
//!
//! Schemaless documents grouped into named collections, with
//! store-assigned identifiers and creation timestamps. The only
//! operations are create-with-autogenerated-id, read-all-in-collection
//! and delete-by-id; there is no update path.

mod error;
mod file;
mod store;
mod types;

pub use error::StoreError;
pub use file::{Backing, JsonFileStore, MemoryBacking, Snapshot};
pub use store::DocumentStore;
pub use types::{server_timestamp, Document, StoreTimestamp};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_store_timestamp_round_trip() {
        let ts = StoreTimestamp {
            seconds: 1_700_000_000,
            nanoseconds: 500,
        };
        let dt = ts.to_datetime().unwrap();

        assert_eq!(StoreTimestamp::from(dt), ts);
    }

    #[test]
    fn test_store_timestamp_out_of_range() {
        let ts = StoreTimestamp {
            seconds: i64::MAX,
            nanoseconds: 0,
        };
        assert!(ts.to_datetime().is_none());
    }

    #[test]
    fn test_store_timestamp_serialization() {
        let ts = StoreTimestamp {
            seconds: 1_700_000_000,
            nanoseconds: 0,
        };
        let json = serde_json::to_string(&ts).unwrap();

        assert!(json.contains("\"seconds\":1700000000"));
        assert!(json.contains("\"nanoseconds\":0"));
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = DocumentStore::memory();

        let a = store
            .create("registrations", fields(&[("firstName", json!("Jane"))]))
            .await
            .unwrap();
        let b = store
            .create("registrations", fields(&[("firstName", json!("John"))]))
            .await
            .unwrap();

        assert_eq!(a.id.len(), 20);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_create_resolves_server_timestamp() {
        let store = DocumentStore::memory();

        let doc = store
            .create(
                "registrations",
                fields(&[
                    ("firstName", json!("Jane")),
                    ("registeredAt", server_timestamp()),
                ]),
            )
            .await
            .unwrap();

        let stamped: StoreTimestamp =
            serde_json::from_value(doc.get("registeredAt").unwrap().clone()).unwrap();
        assert!(stamped.seconds > 0);
        // Other fields are untouched
        assert_eq!(doc.get("firstName"), Some(&json!("Jane")));
    }

    #[tokio::test]
    async fn test_client_timestamps_pass_through() {
        let store = DocumentStore::memory();

        // A literal timestamp-shaped object is not the sentinel
        let doc = store
            .create(
                "registrations",
                fields(&[("registeredAt", json!({"seconds": 1, "nanoseconds": 2}))]),
            )
            .await
            .unwrap();

        assert_eq!(
            doc.get("registeredAt"),
            Some(&json!({"seconds": 1, "nanoseconds": 2}))
        );
    }

    #[tokio::test]
    async fn test_list_empty_collection() {
        let store = DocumentStore::memory();
        assert!(store.list("registrations").await.is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order() {
        let store = DocumentStore::memory();

        for name in ["first", "second", "third"] {
            store
                .create("registrations", fields(&[("firstName", json!(name))]))
                .await
                .unwrap();
        }

        let docs = store.list("registrations").await;
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].get("firstName"), Some(&json!("first")));
        assert_eq!(docs[2].get("firstName"), Some(&json!("third")));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let store = DocumentStore::memory();

        let doc = store
            .create("registrations", fields(&[("firstName", json!("Jane"))]))
            .await
            .unwrap();
        assert_eq!(store.count("registrations").await, 1);

        let removed = store.delete("registrations", &doc.id).await.unwrap();
        assert_eq!(removed.id, doc.id);
        assert_eq!(store.count("registrations").await, 0);
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let store = DocumentStore::memory();
        store
            .create("registrations", Map::new())
            .await
            .unwrap();

        let result = store.delete("registrations", "missing-id").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        // Nothing was removed
        assert_eq!(store.count("registrations").await, 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_collection() {
        let store = DocumentStore::memory();
        let result = store.delete("nope", "some-id").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = DocumentStore::memory();

        store
            .create("registrations", Map::new())
            .await
            .unwrap();
        store.create("volunteers", Map::new()).await.unwrap();

        assert_eq!(store.count("registrations").await, 1);
        assert_eq!(store.count("volunteers").await, 1);
        assert_eq!(store.list("registrations").await.len(), 1);
    }

    #[tokio::test]
    async fn test_file_backing_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = DocumentStore::open(Backing::file(path.clone())).await.unwrap();
        let doc = store
            .create(
                "registrations",
                fields(&[("firstName", json!("Jane")), ("eventFee", json!(35))]),
            )
            .await
            .unwrap();

        // Reopen from the same file
        let reopened = DocumentStore::open(Backing::file(path)).await.unwrap();
        let docs = reopened.list("registrations").await;

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, doc.id);
        assert_eq!(docs[0].get("eventFee"), Some(&json!(35)));
    }

    #[tokio::test]
    async fn test_file_backing_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        let store = DocumentStore::open(Backing::file(path)).await.unwrap();
        assert_eq!(store.count("registrations").await, 0);
    }

    #[tokio::test]
    async fn test_file_backing_delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = DocumentStore::open(Backing::file(path.clone())).await.unwrap();
        let doc = store
            .create("registrations", Map::new())
            .await
            .unwrap();
        store.create("registrations", Map::new()).await.unwrap();
        store.delete("registrations", &doc.id).await.unwrap();

        let reopened = DocumentStore::open(Backing::file(path)).await.unwrap();
        let docs = reopened.list("registrations").await;
        assert_eq!(docs.len(), 1);
        assert_ne!(docs[0].id, doc.id);
    }
}
