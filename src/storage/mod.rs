//! Storage layer for MoneyUP
//!
//! Every persisted blob lives under its own key as a JSON document. The
//! business logic only sees the [`KeyValueStore`] trait, so the same ledger
//! and onboarding code runs against files on disk or an in-memory map.

pub mod file_io;
pub mod file_store;
pub mod keys;
pub mod memory;

pub use file_store::FileStore;
pub use keys::StorageKey;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::{MoneyUpError, MoneyUpResult};

/// Get/set/remove of string values by key
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, if any
    fn get_raw(&self, key: &str) -> MoneyUpResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_raw(&self, key: &str, value: &str) -> MoneyUpResult<()>;

    /// Remove `key`, returning whether a value was present
    fn remove(&self, key: &str) -> MoneyUpResult<bool>;

    fn contains(&self, key: &str) -> MoneyUpResult<bool> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// Read and deserialize the document stored under `key`
pub fn load_json<T>(store: &dyn KeyValueStore, key: StorageKey) -> MoneyUpResult<Option<T>>
where
    T: DeserializeOwned,
{
    match store.get_raw(key.as_str())? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            MoneyUpError::Storage(format!("Failed to parse {}: {}", key, e))
        }),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`
pub fn save_json<T>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> MoneyUpResult<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| MoneyUpError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
    store.set_raw(key.as_str(), &raw)
}

/// Load the document under `key`, substituting the default when it is
/// missing, unreadable or malformed
///
/// Corrupt data and absent data are indistinguishable to the caller; the
/// failure is only logged.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
{
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key = %key, error = %e, "falling back to default value");
            T::default()
        }
    }
}

/// Read a boolean flag; anything other than a stored `true` reads as false
pub fn read_flag(store: &dyn KeyValueStore, key: StorageKey) -> bool {
    load_or_default::<bool>(store, key)
}

pub fn write_flag(store: &dyn KeyValueStore, key: StorageKey, value: bool) -> MoneyUpResult<()> {
    save_json(store, key, &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_save_and_load_json() {
        let store = MemoryStore::new();
        let data = TestData {
            name: "rent".into(),
            value: 800,
        };

        save_json(&store, StorageKey::UserProfile, &data).unwrap();
        let loaded: Option<TestData> = load_json(&store, StorageKey::UserProfile).unwrap();
        assert_eq!(loaded, Some(data));
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<TestData> = load_json(&store, StorageKey::UserProfile).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_is_storage_error() {
        let store = MemoryStore::new();
        store.set_raw(StorageKey::UserProfile.as_str(), "{oops").unwrap();

        let err = load_json::<TestData>(&store, StorageKey::UserProfile).unwrap_err();
        assert!(matches!(err, MoneyUpError::Storage(_)));
    }

    #[test]
    fn test_load_or_default_recovers_from_corruption() {
        let store = MemoryStore::new();
        store.set_raw(StorageKey::UserProfile.as_str(), "not json").unwrap();

        let loaded: TestData = load_or_default(&store, StorageKey::UserProfile);
        assert_eq!(loaded, TestData::default());
    }

    #[test]
    fn test_flags() {
        let store = MemoryStore::new();
        assert!(!read_flag(&store, StorageKey::PremiumUser));

        write_flag(&store, StorageKey::PremiumUser, true).unwrap();
        assert!(read_flag(&store, StorageKey::PremiumUser));
        assert_eq!(
            store.get_raw(StorageKey::PremiumUser.as_str()).unwrap().as_deref(),
            Some("true")
        );

        store.set_raw(StorageKey::PremiumUser.as_str(), "\"yes\"").unwrap();
        assert!(!read_flag(&store, StorageKey::PremiumUser));
    }
}
