//! Shared types, error model, and configuration for cmdref.
//!
//! This crate is the foundation depended on by all other cmdref crates.
//! It provides:
//! - [`CmdRefError`] — the unified error type
//! - Domain types ([`CatalogEntry`], [`CommandDetail`], [`CacheEntry`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CacheConfig, SourceConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{CmdRefError, Result};
pub use types::{
    CATALOG_CACHE_KEY, CacheEntry, CatalogEntry, CommandDetail, DETAIL_CACHE_KEY_PREFIX,
    RawCatalog, RawCatalogEntry,
};
