//! In-memory key-value store
//!
//! Used by tests and for sessions that should leave nothing on disk.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{MoneyUpError, MoneyUpResult};

use super::KeyValueStore;

/// A [`KeyValueStore`] backed by a `HashMap`
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> MoneyUpResult<Option<String>> {
        let data = self.data.read().map_err(|e| {
            MoneyUpError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> MoneyUpResult<()> {
        let mut data = self.data.write().map_err(|e| {
            MoneyUpError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> MoneyUpResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            MoneyUpError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        Ok(data.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get_raw("anything").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set_raw("k", "1").unwrap();
        store.set_raw("k", "2").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.set_raw("k", "1").unwrap();

        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(!store.contains("k").unwrap());
    }
}
