use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::StorageError;

/// A key/value area scoped to one browsing session, cleared when the tab closes.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process session storage.
///
/// Clones share the same map, so dropping a [`TokenStore`](super::TokenStore)
/// and building a new one over a clone models a page reload within the tab.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStorage {
    entry: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Storage for execution contexts that have none.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStorage;

impl SessionStorage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_put_get_remove() {
        let storage = MemorySessionStorage::new();
        assert_eq!(storage.get_item("k"), Ok(None));

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k"), Ok(Some("v2".to_string())));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k"), Ok(None));
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemorySessionStorage::new();
        let tab = storage.clone();
        storage.set_item("k", "v").unwrap();
        assert_eq!(tab.get_item("k"), Ok(Some("v".to_string())));
    }

    #[test]
    fn test_unavailable_storage_always_errors() {
        let storage = UnavailableStorage;
        assert_eq!(storage.get_item("k"), Err(StorageError::Unavailable));
        assert_eq!(storage.set_item("k", "v"), Err(StorageError::Unavailable));
        assert_eq!(storage.remove_item("k"), Err(StorageError::Unavailable));
    }
}
