use std::sync::{Mutex, MutexGuard};

use crate::utils::redact;

use super::storage::SessionStorage;

/// Key under which the bearer credential is mirrored into session storage
pub const TOKEN_STORAGE_KEY: &str = "access_token";

/// Holds the bearer credential for one client script context.
///
/// Constructed once per client session and passed to whatever needs it.
/// Writes are whole-value replacements, so concurrent tasks in the same tab
/// see last-write-wins. There is no expiry tracking; a stale token is only
/// discovered when the backend rejects it.
///
/// Storage failures never reach the caller: they are logged and the store
/// behaves as if nothing was persisted.
pub struct TokenStore<S: SessionStorage> {
    storage: S,
    token: Mutex<Option<String>>,
}

impl<S: SessionStorage> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            token: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load_from_storage(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_STORAGE_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::debug!("Token storage read skipped: {}", e);
                None
            }
        }
    }

    /// Load the token from session storage, if any. Safe to call repeatedly.
    ///
    /// Without usable storage the held token is left as it is.
    pub fn init(&self) {
        match self.storage.get_item(TOKEN_STORAGE_KEY) {
            Ok(stored) => *self.slot() = stored.filter(|v| !v.is_empty()),
            Err(e) => tracing::debug!("Token storage init skipped: {}", e),
        }
    }

    /// Replace the held token.
    pub fn set_token(&self, value: &str) {
        if value.is_empty() {
            self.clear_token();
            return;
        }
        *self.slot() = Some(value.to_string());
        if let Err(e) = self.storage.set_item(TOKEN_STORAGE_KEY, value) {
            tracing::debug!("Token kept in memory only: {}", e);
        }
        tracing::debug!("Stored access token {}", redact(value));
    }

    /// Current token. Falls back to one storage read when nothing is held.
    pub fn get_token(&self) -> Option<String> {
        let mut slot = self.slot();
        if slot.is_none() {
            *slot = self.load_from_storage();
        }
        slot.clone()
    }

    pub fn clear_token(&self) {
        *self.slot() = None;
        if let Err(e) = self.storage.remove_item(TOKEN_STORAGE_KEY) {
            tracing::debug!("Token storage clear skipped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemorySessionStorage, UnavailableStorage};
    use std::sync::Arc;

    #[test]
    fn test_set_then_get() {
        let store = TokenStore::new(MemorySessionStorage::new());
        store.set_token("x.y.z");
        assert_eq!(store.get_token().as_deref(), Some("x.y.z"));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let storage = MemorySessionStorage::new();
        let store = TokenStore::new(storage.clone());
        store.set_token("first");
        store.set_token("second");
        assert_eq!(store.get_token().as_deref(), Some("second"));
        assert_eq!(
            storage.get_item(TOKEN_STORAGE_KEY),
            Ok(Some("second".to_string()))
        );
    }

    #[test]
    fn test_clear_then_get_is_none() {
        let storage = MemorySessionStorage::new();
        let store = TokenStore::new(storage.clone());
        store.set_token("x");
        store.clear_token();
        assert_eq!(store.get_token(), None);
        assert_eq!(storage.get_item(TOKEN_STORAGE_KEY), Ok(None));
    }

    #[test]
    fn test_init_after_reload_restores_token() {
        let storage = MemorySessionStorage::new();
        {
            let store = TokenStore::new(storage.clone());
            store.set_token("persisted");
        }

        let reloaded = TokenStore::new(storage);
        reloaded.init();
        assert_eq!(reloaded.get_token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_get_lazily_loads_without_init() {
        let storage = MemorySessionStorage::new();
        storage.set_item(TOKEN_STORAGE_KEY, "lazy").unwrap();

        let store = TokenStore::new(storage);
        assert_eq!(store.get_token().as_deref(), Some("lazy"));
    }

    #[test]
    fn test_init_is_idempotent_and_safe_when_empty() {
        let store = TokenStore::new(MemorySessionStorage::new());
        store.init();
        store.init();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_unavailable_storage_never_panics() {
        let store = TokenStore::new(UnavailableStorage);
        store.init();
        assert_eq!(store.get_token(), None);

        store.set_token("memory-only");
        assert_eq!(store.get_token().as_deref(), Some("memory-only"));

        store.clear_token();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_init_without_storage_keeps_memory_token() {
        let store = TokenStore::new(UnavailableStorage);
        store.set_token("memory-only");
        store.init();
        assert_eq!(store.get_token().as_deref(), Some("memory-only"));
    }

    #[test]
    fn test_separate_sessions_are_independent() {
        let a = TokenStore::new(MemorySessionStorage::new());
        let b = TokenStore::new(MemorySessionStorage::new());
        a.set_token("a");
        assert_eq!(b.get_token(), None);
    }

    #[test]
    fn test_concurrent_writes_leave_one_whole_value() {
        let store = Arc::new(TokenStore::new(MemorySessionStorage::new()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.set_token(&format!("token-{i}")))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let token = store.get_token().unwrap();
        assert!(token.starts_with("token-"));
        assert!((0..8).any(|i| token == format!("token-{i}")));
    }
}
