use std::collections::HashMap as StdHashMap;
use std::sync::Arc;

use tracing::debug;

use super::SessionStore;
use crate::error::StorageError;

/// A single in-memory KV store. Cloning yields another handle onto the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    map: Arc<parking_lot::RwLock<StdHashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.map.read().len() }
    pub fn is_empty(&self) -> bool { self.map.read().is_empty() }
    pub fn clear(&self) { self.map.write().clear(); }
    /// Return a snapshot of all keys in this store
    pub fn keys(&self) -> Vec<String> {
        let mut out: Vec<String> = self.map.read().keys().cloned().collect();
        out.sort();
        out
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v = self.map.read().get(key).cloned();
        debug!(target: "vitahealth::storage", "memory.get key={} hit={}", key, v.is_some());
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.write().insert(key.to_string(), value.to_string());
        debug!(target: "vitahealth::storage", "memory.set key={} bytes={}", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.map.write().remove(key).is_some();
        debug!(target: "vitahealth::storage", "memory.remove key={} removed={}", key, removed);
        Ok(())
    }
}
