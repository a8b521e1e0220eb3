//! JSON-file persistence for the document store.

use crate::error::StoreError;
use crate::types::Document;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

/// Full on-disk snapshot: every collection with its documents in
/// creation order.
pub type Snapshot = HashMap<String, Vec<Document>>;

/// Plain JSON file store.
pub struct JsonFileStore {
    storage_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(storage_path: PathBuf) -> Self {
        Self { storage_path }
    }

    /// Save a snapshot to disk.
    ///
    /// Writes atomically using temp file + rename.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(snapshot)?;

        // Ensure parent directory exists
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.storage_path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.storage_path).await?;

        debug!(
            "Saved store snapshot ({} bytes) to {:?}",
            data.len(),
            self.storage_path
        );
        Ok(())
    }

    /// Load a snapshot from disk.
    ///
    /// Returns an empty snapshot if the file doesn't exist.
    pub async fn load(&self) -> Result<Snapshot, StoreError> {
        if !self.storage_path.exists() {
            info!(
                "Store file not found at {:?}, starting empty",
                self.storage_path
            );
            return Ok(Snapshot::new());
        }

        let data = fs::read(&self.storage_path).await?;
        let snapshot: Snapshot = serde_json::from_slice(&data)?;

        info!(
            "Loaded {} collections from {:?}",
            snapshot.len(),
            self.storage_path
        );
        Ok(snapshot)
    }
}

/// In-memory only backing for testing or when persistence is disabled.
pub struct MemoryBacking;

impl MemoryBacking {
    /// "Save" does nothing for the memory backing.
    pub async fn save(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        debug!("Memory backing: save is a no-op");
        Ok(())
    }

    /// "Load" returns an empty snapshot.
    pub async fn load(&self) -> Result<Snapshot, StoreError> {
        debug!("Memory backing: returning empty snapshot");
        Ok(Snapshot::new())
    }
}

/// Storage backend with or without persistence.
pub enum Backing {
    /// JSON file storage
    File(JsonFileStore),
    /// In-memory only (no persistence)
    Memory(MemoryBacking),
}

impl Backing {
    /// File-backed storage at the given path.
    pub fn file(storage_path: PathBuf) -> Self {
        Backing::File(JsonFileStore::new(storage_path))
    }

    /// Memory-only storage.
    pub fn memory() -> Self {
        warn!("Persistence disabled, documents will be lost on restart");
        Backing::Memory(MemoryBacking)
    }

    /// Save a snapshot.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        match self {
            Backing::File(s) => s.save(snapshot).await,
            Backing::Memory(s) => s.save(snapshot).await,
        }
    }

    /// Load a snapshot.
    pub async fn load(&self) -> Result<Snapshot, StoreError> {
        match self {
            Backing::File(s) => s.load().await,
            Backing::Memory(s) => s.load().await,
        }
    }
}
