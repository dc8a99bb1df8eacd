use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::paths::{store_file, store_tmp_file};
use super::SessionStore;
use crate::error::StorageError;

/// File-backed KV store: one pretty-printed JSON object per directory.
/// Every call goes to disk so independent handles on one directory stay consistent.
#[derive(Clone)]
pub struct FileStore {
    dir: PathBuf,
    /// Serializes read-modify-write cycles from handles cloned off this one.
    write_lock: Arc<parking_lot::Mutex<()>>,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        debug!(target: "vitahealth::storage", "file.open dir={:?}", dir);
        Ok(Self { dir, write_lock: Arc::new(parking_lot::Mutex::new(())) })
    }

    pub fn dir(&self) -> &Path { &self.dir }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let path = store_file(&self.dir);
        if !path.exists() { return Ok(BTreeMap::new()); }
        let bytes = std::fs::read(&path)?;
        if bytes.is_empty() { return Ok(BTreeMap::new()); }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(map)?;
        let tmp = store_tmp_file(&self.dir);
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(tmp, store_file(&self.dir))?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v = self.load()?.remove(key);
        debug!(target: "vitahealth::storage", "file.get key={} hit={}", key, v.is_some());
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _g = self.write_lock.lock();
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)?;
        debug!(target: "vitahealth::storage", "file.set key={} bytes={}", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _g = self.write_lock.lock();
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
            debug!(target: "vitahealth::storage", "file.remove key={}", key);
        }
        Ok(())
    }
}
