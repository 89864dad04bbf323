//! Durable persistence of the access and refresh tokens.

use std::sync::Arc;

use crate::storage::{PlatformStorage, StorageBackend};

pub const ACCESS_TOKEN_KEY: &str = "blog_access_token";
pub const REFRESH_TOKEN_KEY: &str = "blog_refresh_token";

/// Get/set/clear over the two token keys. Cheap to clone.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn StorageBackend>,
}

impl TokenStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Store backed by `localStorage` / the config directory.
    pub fn platform() -> Self {
        Self::new(PlatformStorage)
    }

    pub fn access_token(&self) -> Option<String> {
        self.backend.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.backend.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Persist a token pair. A missing refresh token leaves the stored one alone.
    pub fn set_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        self.set_access_token(access_token);
        if let Some(refresh) = refresh_token {
            if !self.backend.set(REFRESH_TOKEN_KEY, refresh) {
                crate::log_warn!("failed to persist refresh token");
            }
        }
    }

    pub fn set_access_token(&self, token: &str) {
        if !self.backend.set(ACCESS_TOKEN_KEY, token) {
            crate::log_warn!("failed to persist access token");
        }
    }

    pub fn clear(&self) {
        self.backend.remove(ACCESS_TOKEN_KEY);
        self.backend.remove(REFRESH_TOKEN_KEY);
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_access_token", &self.access_token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn refresh_token_survives_access_only_update() {
        let store = TokenStore::new(MemoryStorage::new());
        store.set_tokens("a1", Some("r1"));
        store.set_tokens("a2", None);
        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn clear_removes_both_keys() {
        let storage = MemoryStorage::new();
        let store = TokenStore::new(storage.clone());
        store.set_tokens("a", Some("r"));
        store.clear();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    }

    #[test]
    fn empty_values_read_as_absent() {
        let store = TokenStore::new(MemoryStorage::new().with_entry(ACCESS_TOKEN_KEY, ""));
        assert_eq!(store.access_token(), None);
    }
}
