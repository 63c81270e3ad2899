//! String key/value stores backing the cmdref cache.
//!
//! This crate provides:
//! - [`CacheStore`] — the store contract: plain string get/set/remove/keys
//! - [`MemoryStore`] — HashMap-backed store for tests
//! - [`DiskStore`] — one file per key under a cache directory
//!
//! Deliberately dumb: no expiry, no envelope parsing. Freshness checks and
//! the `CacheEntry` envelope live with the fetch layer.

mod disk;

use std::collections::HashMap;
use std::sync::Mutex;

use cmdref_shared::Result;

pub use disk::DiskStore;

/// Contract for a string-keyed, string-valued store.
///
/// Reads degrade to "absent" on any failure; a broken store never surfaces
/// an error on the lookup path. Writes and removals report their failures
/// so callers can decide whether to log or propagate.
pub trait CacheStore: Send + Sync {
    /// Look up a value. `None` covers both "never stored" and "unreadable".
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Enumerate all currently-stored keys, in no particular order.
    fn keys(&self) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store for tests and no-persistence runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.map.lock() {
            Ok(map) => map.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if let Ok(mut map) = self.map.lock() {
            map.remove(key);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        match self.map.lock() {
            Ok(map) => map.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v1").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v1"));

        // Refresh is a full overwrite.
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn memory_store_remove_absent_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("never-stored").is_ok());
    }

    #[test]
    fn memory_store_lists_keys() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, ["a", "b"]);
    }
}
