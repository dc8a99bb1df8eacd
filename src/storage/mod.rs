//!
//! vitahealth storage module
//! -------------------------
//! The environment-facing key-value store the session layer persists into. It models
//! browser local storage: string keys, string values, three operations. Only the
//! session manager writes to it, and only under a single fixed key.
//!
//! Two backends are provided:
//! - `MemoryStore`: process-local map; clones share contents.
//! - `FileStore`: a single JSON document on disk, rewritten atomically on every change,
//!   so a fresh store opened on the same directory observes earlier writes.

use crate::error::StorageError;

mod paths;
pub mod kv;
pub mod file;

pub use kv::MemoryStore;
pub use file::FileStore;

/// Minimal key-value contract the session manager depends on.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
