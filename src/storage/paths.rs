use std::path::{Path, PathBuf};

/// Locations of the file-backed store inside its directory.
#[inline]
pub fn store_file(dir: &Path) -> PathBuf { dir.join("store.json") }

#[inline]
pub fn store_tmp_file(dir: &Path) -> PathBuf { store_file(dir).with_extension("json.tmp") }
