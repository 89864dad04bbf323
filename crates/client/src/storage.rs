//! Cross-platform durable key/value storage.
//!
//! - Web: `localStorage`
//! - Desktop: one text file per key in the platform config directory:
//!   - Linux: `~/.config/blogfront/`
//!   - macOS: `~/Library/Application Support/blogfront/`
//!   - Windows: `%APPDATA%\blogfront\`
//!
//! [`MemoryStorage`] keeps everything in process and is what tests use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Minimal string storage the token store persists through.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns `true` if the value was written.
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

/// Browser `localStorage` on wasm32, config-dir files elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformStorage;

impl StorageBackend for PlatformStorage {
    fn get(&self, key: &str) -> Option<String> {
        load_raw(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        save_raw(key, value)
    }

    fn remove(&self, key: &str) {
        remove_raw(key)
    }
}

/// In-process storage; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. a token left behind by a previous visit.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

// =========================================
// Web (WASM) implementation
// =========================================

#[cfg(target_arch = "wasm32")]
fn save_raw(key: &str, value: &str) -> bool {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            return storage.set_item(key, value).is_ok();
        }
    }
    false
}

#[cfg(target_arch = "wasm32")]
fn load_raw(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn remove_raw(key: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// =========================================
// Desktop (native) implementation
// =========================================

#[cfg(not(target_arch = "wasm32"))]
fn app_dir() -> Option<std::path::PathBuf> {
    let dir = dirs::config_dir()?.join("blogfront");
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

#[cfg(not(target_arch = "wasm32"))]
fn key_path(key: &str) -> Option<std::path::PathBuf> {
    let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
    Some(app_dir()?.join(safe_key))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_raw(key: &str, value: &str) -> bool {
    let Some(path) = key_path(key) else {
        return false;
    };
    std::fs::write(path, value).is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_raw(key: &str) -> Option<String> {
    std::fs::read_to_string(key_path(key)?).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw(key: &str) {
    if let Some(path) = key_path(key) {
        let _ = std::fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        assert!(a.set("k", "v"));
        assert_eq!(b.get("k").as_deref(), Some("v"));
        b.remove("k");
        assert_eq!(a.get("k"), None);
    }
}
