//! Core domain types for the command-reference catalog and detail documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

/// Fixed cache key for the full command catalog.
pub const CATALOG_CACHE_KEY: &str = "command-catalog";

/// Prefix for per-command detail cache keys (`<prefix><name>`).
pub const DETAIL_CACHE_KEY_PREFIX: &str = "command-detail-";

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// A catalog entry exactly as delivered by the remote index.
///
/// The remote uses single-letter field names to keep the index small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCatalogEntry {
    /// Command name.
    #[serde(rename = "n")]
    pub name: String,
    /// One-line description.
    #[serde(rename = "d")]
    pub description: String,
    /// Path of the reference document within the dataset.
    #[serde(rename = "p")]
    pub path: String,
}

/// The catalog as delivered: command name mapped to its raw entry.
///
/// Held in a `BTreeMap` so iteration (and thus every transformed listing)
/// is deterministic by name.
pub type RawCatalog = BTreeMap<String, RawCatalogEntry>;

/// A catalog entry enriched with its detail document URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Command name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Path of the reference document within the dataset.
    pub path: String,
    /// Full URL of the reference document. Derived from the name and the
    /// configured base URL on every transform, never cached on its own.
    pub detail_url: String,
}

// ---------------------------------------------------------------------------
// Detail types
// ---------------------------------------------------------------------------

/// Structured record extracted from one command's reference document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDetail {
    /// Command name.
    pub name: String,
    /// First paragraph after the document title.
    pub description: String,
    /// Cleaned full document text.
    pub content: String,
    /// Reserved field; not populated by the current extraction rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    /// Shell example snippets in document order, at most ten.
    pub examples: Vec<String>,
}

// ---------------------------------------------------------------------------
// Cache envelope
// ---------------------------------------------------------------------------

/// The unit actually persisted in the cache store: a payload stamped with
/// its write time in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: i64,
}

impl<T: DeserializeOwned> CacheEntry<T> {
    /// Parse a stored string back into an entry. Any malformed input is
    /// reported as `None`; a broken cache is a miss, never an error.
    pub fn from_stored(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl<T> CacheEntry<T> {
    /// Whether this entry is still fresh for the given TTL at time `now_ms`.
    pub fn is_fresh(&self, ttl_ms: i64, now_ms: i64) -> bool {
        now_ms - self.timestamp < ttl_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_entry_uses_short_wire_names() {
        let json = r#"{"n":"ls","d":"List directory contents","p":"/command/ls.md"}"#;
        let entry: RawCatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "ls");
        assert_eq!(entry.description, "List directory contents");

        let out = serde_json::to_string(&entry).unwrap();
        assert!(out.contains("\"n\":\"ls\""));
        assert!(!out.contains("\"name\""));
    }

    #[test]
    fn raw_catalog_iterates_in_name_order() {
        let json = r#"{
            "tar": {"n":"tar","d":"Archive utility","p":"/command/tar.md"},
            "cp": {"n":"cp","d":"Copy files","p":"/command/cp.md"}
        }"#;
        let catalog: RawCatalog = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = catalog.keys().map(String::as_str).collect();
        assert_eq!(names, ["cp", "tar"]);
    }

    #[test]
    fn detail_omits_empty_syntax() {
        let detail = CommandDetail {
            name: "ls".into(),
            description: "List directory contents".into(),
            content: "ls\n===\n".into(),
            syntax: None,
            examples: vec!["ls -la".into()],
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("syntax"));

        let parsed: CommandDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, detail);
    }

    #[test]
    fn cache_entry_freshness() {
        let entry = CacheEntry {
            data: "payload".to_string(),
            timestamp: 1_000,
        };
        assert!(entry.is_fresh(100, 1_099));
        // Exactly TTL old is stale.
        assert!(!entry.is_fresh(100, 1_100));
        assert!(!entry.is_fresh(100, 1_101));
    }

    #[test]
    fn cache_entry_malformed_is_none() {
        assert!(CacheEntry::<String>::from_stored("not json").is_none());
        assert!(CacheEntry::<String>::from_stored("{\"data\":42}").is_none());
    }

    #[test]
    fn catalog_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/catalog.fixture.json")
            .expect("read fixture");
        let catalog: RawCatalog = serde_json::from_str(&fixture).expect("deserialize fixture");
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog["ls"].description, "List directory contents");
        assert!(catalog["tar"].path.ends_with("tar.md"));
    }
}
