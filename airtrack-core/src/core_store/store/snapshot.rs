/*
    snapshot.rs - Whole-state snapshots over a key-value backend

    Every store domain persists as one JSON document under its own key.
    There is no versioning and no merge: a save replaces the slot, a load
    rehydrates whatever was last written.
*/

use crate::core_store::store::errors::{StoreError, StoreResult};
use crate::core_store::store::kv::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Reads and writes serialized snapshots through a shared backend
#[derive(Clone)]
pub struct SnapshotAdapter {
    kv: Arc<dyn KeyValueStore>,
}

impl SnapshotAdapter {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        SnapshotAdapter { kv }
    }

    /// Load the snapshot stored under `key`, if any
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Deserialization {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Replace the snapshot stored under `key`
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.kv.set(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "snapshot saved");
        Ok(())
    }

    pub fn clear(&self, key: &str) -> StoreResult<()> {
        self.kv.remove(key)
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }
}
