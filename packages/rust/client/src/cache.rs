//! TTL-wrapped cache-or-fetch flow.
//!
//! One generic helper serves both the catalog and the detail fetcher: look
//! up the key, accept a fresh entry, otherwise run the fetch closure and
//! persist its result. Absent, malformed, and stale entries are all the
//! same silent miss.

use std::future::Future;

use chrono::Utc;
use cmdref_shared::{CATALOG_CACHE_KEY, CacheEntry, CmdRefError, DETAIL_CACHE_KEY_PREFIX, Result};
use cmdref_store::CacheStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Read a fresh entry's payload under `key`, or `None` on any miss.
pub(crate) fn read_fresh<T: DeserializeOwned>(
    store: &dyn CacheStore,
    key: &str,
    ttl_ms: i64,
) -> Option<T> {
    let raw = store.get(key)?;
    let entry: CacheEntry<T> = CacheEntry::from_stored(&raw)?;

    let now = Utc::now().timestamp_millis();
    if entry.is_fresh(ttl_ms, now) {
        debug!(key, age_ms = now - entry.timestamp, "cache hit");
        Some(entry.data)
    } else {
        debug!(key, age_ms = now - entry.timestamp, ttl_ms, "cache entry stale");
        None
    }
}

/// Persist a payload under `key`, stamped with the current time.
/// Refresh is a full overwrite of whatever was stored before.
pub(crate) fn write_entry<T: Serialize>(
    store: &dyn CacheStore,
    key: &str,
    data: &T,
) -> Result<()> {
    let entry = CacheEntry {
        data,
        timestamp: Utc::now().timestamp_millis(),
    };
    let raw = serde_json::to_string(&entry).map_err(|e| CmdRefError::Store(e.to_string()))?;
    store.set(key, &raw)
}

/// Cache-or-fetch: return the fresh cached payload for `key`, or run
/// `fetch`, persist its result, and return it.
///
/// A failed cache write is logged and the fetched data still flows back;
/// a fetch error propagates and nothing is written.
pub(crate) async fn fetch_through<T, F, Fut>(
    store: &dyn CacheStore,
    key: &str,
    ttl_ms: i64,
    fetch: F,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(data) = read_fresh(store, key, ttl_ms) {
        return Ok(data);
    }

    let data = fetch().await?;

    if let Err(e) = write_entry(store, key, &data) {
        warn!(key, error = %e, "cache write failed");
    }

    Ok(data)
}

/// Remove the catalog entry and every per-command detail entry.
/// Keys outside the cmdref key space are left alone.
pub(crate) fn clear_all(store: &dyn CacheStore) -> Result<()> {
    store.remove(CATALOG_CACHE_KEY)?;

    for key in store.keys() {
        if key.starts_with(DETAIL_CACHE_KEY_PREFIX) {
            store.remove(&key)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdref_store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn read_fresh_absent_is_miss() {
        let store = MemoryStore::new();
        assert_eq!(read_fresh::<String>(&store, "k", 1_000), None);
    }

    #[test]
    fn read_fresh_roundtrips_written_entry() {
        let store = MemoryStore::new();
        write_entry(&store, "k", &"payload".to_string()).unwrap();
        assert_eq!(
            read_fresh::<String>(&store, "k", 1_000).as_deref(),
            Some("payload")
        );
    }

    #[test]
    fn read_fresh_stale_is_miss() {
        let store = MemoryStore::new();
        let entry = CacheEntry {
            data: "old".to_string(),
            timestamp: Utc::now().timestamp_millis() - 1_001,
        };
        store.set("k", &serde_json::to_string(&entry).unwrap()).unwrap();

        assert_eq!(read_fresh::<String>(&store, "k", 1_000), None);
    }

    #[test]
    fn read_fresh_malformed_is_miss() {
        let store = MemoryStore::new();
        store.set("k", "not json at all").unwrap();
        assert_eq!(read_fresh::<String>(&store, "k", 1_000), None);
    }

    #[tokio::test]
    async fn fetch_through_skips_fetch_on_hit() {
        let store = MemoryStore::new();
        let calls = AtomicUsize::new(0);
        let calls_ref = &calls;

        let first: String = fetch_through(&store, "k", 60_000, || async move {
            calls_ref.fetch_add(1, Ordering::SeqCst);
            Ok("fetched".to_string())
        })
        .await
        .unwrap();

        let second: String = fetch_through(&store, "k", 60_000, || async move {
            calls_ref.fetch_add(1, Ordering::SeqCst);
            Ok("should not run".to_string())
        })
        .await
        .unwrap();

        assert_eq!(first, "fetched");
        assert_eq!(second, "fetched");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_through_propagates_fetch_error_without_writing() {
        let store = MemoryStore::new();

        let result: Result<String> = fetch_through(&store, "k", 60_000, || async {
            Err(CmdRefError::Fetch { status: 500 })
        })
        .await;

        assert!(matches!(result, Err(CmdRefError::Fetch { status: 500 })));
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn clear_all_spares_unrelated_keys() {
        let store = MemoryStore::new();
        store.set(CATALOG_CACHE_KEY, "{}").unwrap();
        store.set("command-detail-ls", "{}").unwrap();
        store.set("command-detail-tar", "{}").unwrap();
        store.set("unrelated-key", "keep me").unwrap();

        clear_all(&store).unwrap();

        assert_eq!(store.get(CATALOG_CACHE_KEY), None);
        assert_eq!(store.get("command-detail-ls"), None);
        assert_eq!(store.get("command-detail-tar"), None);
        assert_eq!(store.get("unrelated-key").as_deref(), Some("keep me"));
    }
}
