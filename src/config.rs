//! Runtime configuration read from `VITA_*` environment variables.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::directory::{builtin_tables, SeedDirectory, SeedTables};
use crate::error::{SeedError, StorageError};
use crate::storage::{FileStore, MemoryStore, SessionStore};

pub const ENV_SESSION_DIR: &str = "VITA_SESSION_DIR";
pub const ENV_AUTH_LATENCY_MS: &str = "VITA_AUTH_LATENCY_MS";
pub const ENV_SEED_FILE: &str = "VITA_SEED_FILE";

const DEFAULT_AUTH_LATENCY_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Directory of the file-backed session store; memory-only when unset.
    #[serde(default)]
    pub session_dir: Option<PathBuf>,
    #[serde(default = "PortalConfig::default_latency")]
    pub auth_latency: Duration,
    /// JSON document replacing the built-in seed tables.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self { session_dir: None, auth_latency: Self::default_latency(), seed_file: None }
    }
}

impl PortalConfig {
    fn default_latency() -> Duration { Duration::from_millis(DEFAULT_AUTH_LATENCY_MS) }

    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any variable source; used directly by tests to avoid touching the process env.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let non_empty = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let auth_latency = match non_empty(ENV_AUTH_LATENCY_MS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    warn!(target: "vitahealth::config", "{}='{}' is not a number; using {}ms", ENV_AUTH_LATENCY_MS, raw, DEFAULT_AUTH_LATENCY_MS);
                    Self::default_latency()
                }
            },
            None => Self::default_latency(),
        };
        Self {
            session_dir: non_empty(ENV_SESSION_DIR).map(PathBuf::from),
            auth_latency,
            seed_file: non_empty(ENV_SEED_FILE).map(PathBuf::from),
        }
    }

    pub fn open_store(&self) -> Result<Arc<dyn SessionStore>, StorageError> {
        let store: Arc<dyn SessionStore> = match &self.session_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(store)
    }

    pub fn open_directory(&self) -> Result<SeedDirectory, SeedError> {
        let tables = match &self.seed_file {
            Some(path) => Arc::new(SeedTables::from_json_file(path)?),
            None => builtin_tables(),
        };
        Ok(SeedDirectory::new(tables))
    }
}
