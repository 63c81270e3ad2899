//! In-memory keyword filtering over catalog entries.

use cmdref_shared::CatalogEntry;

/// Case-insensitive substring match against name or description.
///
/// Purely in-memory; operates on an already-fetched catalog. The empty
/// keyword matches every entry — callers wanting different behavior for it
/// special-case it themselves.
pub fn search(entries: &[CatalogEntry], keyword: &str) -> Vec<CatalogEntry> {
    let keyword = keyword.to_lowercase();

    entries
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&keyword)
                || entry.description.to_lowercase().contains(&keyword)
        })
        .cloned()
        .collect()
}
