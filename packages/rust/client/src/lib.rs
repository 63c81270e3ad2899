//! Cached lookup client for the remote command-reference dataset.
//!
//! This crate provides:
//! - [`RefClient`] — catalog and per-command detail fetchers behind a TTL cache
//! - [`search`] — in-memory keyword filtering over fetched catalog entries
//! - [`ClientConfig`] — runtime settings derived from the app config
//!
//! The cache store is injected (never ambient), so tests and callers choose
//! between the in-memory and on-disk stores from `cmdref-store`.

mod cache;
mod client;
mod search;

pub use client::{ClientConfig, RefClient};
pub use search::search;
