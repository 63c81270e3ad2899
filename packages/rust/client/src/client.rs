//! Cached catalog and detail fetchers.
//!
//! Both operations follow the same shape: serve a fresh cache entry, or
//! fetch from the dataset, persist, and return. The catalog caches the raw
//! name-to-entry mapping and derives detail URLs on every transform; detail
//! documents are extracted once on fetch and served as stored on a hit.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{info, instrument};
use url::Url;

use cmdref_shared::{
    AppConfig, CATALOG_CACHE_KEY, CatalogEntry, CmdRefError, CommandDetail,
    DETAIL_CACHE_KEY_PREFIX, RawCatalog, RawCatalogEntry, Result,
};
use cmdref_store::CacheStore;

use crate::cache;

/// User-Agent string for dataset requests.
const USER_AGENT: &str = concat!("cmdref/", env!("CARGO_PKG_VERSION"));

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Runtime client configuration, derived from the app config.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL of the catalog index.
    pub index_url: String,
    /// Base URL for per-command documents (`<base>/<name>.md`).
    pub detail_base_url: String,
    /// Catalog freshness window in milliseconds.
    pub catalog_ttl_ms: i64,
    /// Detail freshness window in milliseconds.
    pub detail_ttl_ms: i64,
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            index_url: config.source.index_url.clone(),
            detail_base_url: config.source.detail_base_url.clone(),
            catalog_ttl_ms: i64::from(config.cache.catalog_ttl_days) * MS_PER_DAY,
            detail_ttl_ms: i64::from(config.cache.detail_ttl_days) * MS_PER_DAY,
        }
    }
}

// ---------------------------------------------------------------------------
// RefClient
// ---------------------------------------------------------------------------

/// Cached lookup client for the command-reference dataset.
///
/// The cache store is an injected dependency so callers (and tests) decide
/// what backs it; the client itself holds no ambient state.
pub struct RefClient {
    http: Client,
    store: Arc<dyn CacheStore>,
    config: ClientConfig,
}

impl RefClient {
    /// Create a client over the given store. Validates the configured URLs
    /// and builds the underlying HTTP client.
    pub fn new(config: ClientConfig, store: Arc<dyn CacheStore>) -> Result<Self> {
        Url::parse(&config.index_url).map_err(|e| {
            CmdRefError::config(format!("invalid index_url '{}': {e}", config.index_url))
        })?;
        Url::parse(&config.detail_base_url).map_err(|e| {
            CmdRefError::config(format!(
                "invalid detail_base_url '{}': {e}",
                config.detail_base_url
            ))
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CmdRefError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            store,
            config,
        })
    }

    /// Fetch the command catalog, served from cache while fresh.
    ///
    /// Exactly one cache write per successful network fetch; none on a hit.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let catalog: RawCatalog = cache::fetch_through(
            self.store.as_ref(),
            CATALOG_CACHE_KEY,
            self.config.catalog_ttl_ms,
            || async move {
                let response = self
                    .http
                    .get(&self.config.index_url)
                    .send()
                    .await
                    .map_err(|e| {
                        CmdRefError::Network(format!("{}: {e}", self.config.index_url))
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(CmdRefError::Fetch {
                        status: status.as_u16(),
                    });
                }

                let catalog: RawCatalog = response
                    .json()
                    .await
                    .map_err(|e| CmdRefError::Network(format!("catalog body: {e}")))?;

                info!(commands = catalog.len(), "catalog fetched");
                Ok(catalog)
            },
        )
        .await?;

        Ok(catalog.into_values().map(|raw| self.to_entry(raw)).collect())
    }

    /// Fetch one command's reference document, served from cache while
    /// fresh. A cached detail is returned as stored, without re-extraction.
    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, name: &str) -> Result<CommandDetail> {
        let key = format!("{DETAIL_CACHE_KEY_PREFIX}{name}");
        let url = detail_url(&self.config.detail_base_url, name);

        cache::fetch_through(
            self.store.as_ref(),
            &key,
            self.config.detail_ttl_ms,
            || async move {
                let response = self
                    .http
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| CmdRefError::Network(format!("{url}: {e}")))?;

                let status = response.status();
                if status == StatusCode::NOT_FOUND {
                    return Err(CmdRefError::not_found(name));
                }
                if !status.is_success() {
                    return Err(CmdRefError::Fetch {
                        status: status.as_u16(),
                    });
                }

                let body = response
                    .text()
                    .await
                    .map_err(|e| CmdRefError::Network(format!("{url}: body read failed: {e}")))?;

                info!(name, bytes = body.len(), "detail fetched");
                Ok(cmdref_markdown::extract(name, &body))
            },
        )
        .await
    }

    /// Drop the cached catalog and every cached detail document.
    pub fn clear_cache(&self) -> Result<()> {
        cache::clear_all(self.store.as_ref())
    }

    fn to_entry(&self, raw: RawCatalogEntry) -> CatalogEntry {
        let detail_url = detail_url(&self.config.detail_base_url, &raw.name);
        CatalogEntry {
            name: raw.name,
            description: raw.description,
            path: raw.path,
            detail_url,
        }
    }
}

/// Detail document URL for a command name.
fn detail_url(base: &str, name: &str) -> String {
    format!("{base}/{name}.md")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
