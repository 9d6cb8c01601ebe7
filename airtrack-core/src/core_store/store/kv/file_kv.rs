//! File-backed key-value store
//!
//! Layout: one file per key, `<base_path>/<key>.json`. Writes go to a
//! temporary sibling first and are renamed into place.

use super::{validate_key, KeyValueStore};
use crate::core_store::store::errors::StoreResult;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Directory-backed key-value store
pub struct FileKvStore {
    base_path: PathBuf,
}

impl FileKvStore {
    /// Open (and create if needed) the directory at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(FileKvStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", key, EXTENSION))
    }

    /// Write file atomically (write to temp, then rename)
    fn write_atomic(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        drop(file);
        fs::rename(temp_path, path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        let path = self.slot_path(key);
        self.write_atomic(&path, value.as_bytes())?;
        tracing::trace!(key, bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = fs::read_dir(&self.base_path)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                let is_slot = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext == EXTENSION)
                    .unwrap_or(false);
                if !is_slot {
                    return None;
                }
                path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}
