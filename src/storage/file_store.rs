//! File-backed key-value store
//!
//! Stores each key as `<key>.json` inside the data directory.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::paths::MoneyUpPaths;
use crate::error::{MoneyUpError, MoneyUpResult};

use super::file_io::{read_if_exists, write_atomic};
use super::KeyValueStore;

/// A [`KeyValueStore`] persisting one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store in the data directory, creating it if needed
    pub fn open(paths: &MoneyUpPaths) -> MoneyUpResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            dir: paths.data_dir(),
        })
    }

    fn path_for(&self, key: &str) -> MoneyUpResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(MoneyUpError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> MoneyUpResult<Option<String>> {
        read_if_exists(self.path_for(key)?)
    }

    fn set_raw(&self, key: &str, value: &str) -> MoneyUpResult<()> {
        let path = self.path_for(key)?;
        debug!(path = %path.display(), bytes = value.len(), "writing storage key");
        write_atomic(path, value)
    }

    fn remove(&self, key: &str) -> MoneyUpResult<bool> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| {
            MoneyUpError::Storage(format!("Failed to remove {}: {}", path.display(), e))
        })?;
        Ok(true)
    }
}
