//! Key-value backends
//!
//! Abstract string-slot API the tracker persists into. Each store domain
//! owns one key and rewrites its whole value on every mutation.

use crate::core_store::store::errors::{StoreError, StoreResult};

pub mod file_kv;
pub mod memory_kv;

pub use file_kv::FileKvStore;
pub use memory_kv::MemoryKvStore;

/// Abstract key-value backend
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// List stored keys
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Keys become file names, so keep them to a portable character set
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
