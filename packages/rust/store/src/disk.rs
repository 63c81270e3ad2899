//! File-per-key disk store.
//!
//! Keys are percent-encoded into file names so that arbitrary command names
//! (dots, slashes, unicode) stay within the cache directory, and `keys()`
//! can decode file names back into the original keys.

use std::path::PathBuf;

use cmdref_shared::{CmdRefError, Result};
use tracing::warn;

use crate::CacheStore;

/// Disk-backed store: one file per key under a cache directory.
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| CmdRefError::io(&dir, e))?;
        Ok(Self { dir })
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(encode_key(key))
    }
}

impl CacheStore for DiskStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| CmdRefError::io(&path, e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CmdRefError::io(&path, e)),
        }
    }

    fn keys(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "cache directory unreadable");
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| decode_key(&entry.file_name().to_string_lossy()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Key <-> file name encoding
// ---------------------------------------------------------------------------

/// Percent-encode a key into a safe file name. Only `[A-Za-z0-9_-]` pass
/// through; everything else (including `.` and `/`) becomes `%XX` per byte.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Decode a file name produced by [`encode_key`] back into the key.
/// Returns `None` for file names that are not valid encodings.
fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(label: &str) -> (DiskStore, PathBuf) {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("cmdref-store-{label}-{nanos}"));
        (DiskStore::open(&dir).unwrap(), dir)
    }

    #[test]
    fn encode_key_passes_safe_chars() {
        assert_eq!(encode_key("command-detail-ls"), "command-detail-ls");
    }

    #[test]
    fn encode_key_escapes_everything_else() {
        assert_eq!(encode_key("a/b.c"), "a%2Fb%2Ec");
        assert_eq!(encode_key(".."), "%2E%2E");
    }

    #[test]
    fn key_roundtrip() {
        for key in ["command-catalog", "command-detail-g++", "a/b.c", "éclair"] {
            assert_eq!(decode_key(&encode_key(key)).as_deref(), Some(key));
        }
    }

    #[test]
    fn decode_rejects_truncated_escape() {
        assert!(decode_key("abc%2").is_none());
        assert!(decode_key("abc%zz").is_none());
    }

    #[test]
    fn disk_store_roundtrip() {
        let (store, dir) = temp_store("roundtrip");

        assert_eq!(store.get("k"), None);
        store.set("k", "value").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("value"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
        assert!(store.remove("k").is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn disk_store_keys_decode_file_names() {
        let (store, dir) = temp_store("keys");

        store.set("command-catalog", "{}").unwrap();
        store.set("command-detail-tar.gz", "{}").unwrap();

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, ["command-catalog", "command-detail-tar.gz"]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
