//! Application configuration for cmdref.
//!
//! User config lives at `~/.cmdref/cmdref.toml`.
//! Missing file means defaults; missing fields fall back per-field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CmdRefError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "cmdref.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".cmdref";

// ---------------------------------------------------------------------------
// Config structs (matching cmdref.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote dataset endpoints.
    #[serde(default)]
    pub source: SourceConfig,

    /// Local cache behavior.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the catalog index (JSON mapping of name to summary).
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Base URL for per-command reference documents
    /// (`<base>/<name>.md`).
    #[serde(default = "default_detail_base_url")]
    pub detail_base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            detail_base_url: default_detail_base_url(),
        }
    }
}

fn default_index_url() -> String {
    "https://unpkg.com/linux-command/dist/data.json".into()
}
fn default_detail_base_url() -> String {
    "https://unpkg.com/linux-command/command".into()
}

/// `[cache]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory. `~` expands to the user's home.
    #[serde(default = "default_cache_dir")]
    pub dir: String,

    /// Days before a cached catalog goes stale.
    #[serde(default = "default_catalog_ttl_days")]
    pub catalog_ttl_days: u32,

    /// Days before a cached detail document goes stale.
    #[serde(default = "default_detail_ttl_days")]
    pub detail_ttl_days: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            catalog_ttl_days: default_catalog_ttl_days(),
            detail_ttl_days: default_detail_ttl_days(),
        }
    }
}

fn default_cache_dir() -> String {
    "~/.cmdref/cache".into()
}
fn default_catalog_ttl_days() -> u32 {
    7
}
fn default_detail_ttl_days() -> u32 {
    30
}

impl CacheConfig {
    /// Resolve the cache directory, expanding a leading `~`.
    pub fn resolved_dir(&self) -> Result<PathBuf> {
        if let Some(rest) = self.dir.strip_prefix("~/") {
            let home = dirs::home_dir()
                .ok_or_else(|| CmdRefError::config("could not determine home directory"))?;
            return Ok(home.join(rest));
        }
        Ok(PathBuf::from(&self.dir))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.cmdref/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CmdRefError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.cmdref/cmdref.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CmdRefError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CmdRefError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CmdRefError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CmdRefError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CmdRefError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("index_url"));
        assert!(toml_str.contains("catalog_ttl_days"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.cache.catalog_ttl_days, 7);
        assert_eq!(parsed.cache.detail_ttl_days, 30);
        assert_eq!(
            parsed.source.index_url,
            "https://unpkg.com/linux-command/dist/data.json"
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[source]
index_url = "https://mirror.example.com/data.json"

[cache]
detail_ttl_days = 90
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.source.index_url, "https://mirror.example.com/data.json");
        assert_eq!(
            config.source.detail_base_url,
            "https://unpkg.com/linux-command/command"
        );
        assert_eq!(config.cache.catalog_ttl_days, 7);
        assert_eq!(config.cache.detail_ttl_days, 90);
    }

    #[test]
    fn resolved_dir_expands_tilde() {
        let cache = CacheConfig::default();
        let dir = cache.resolved_dir().expect("resolve");
        assert!(dir.is_absolute());
        assert!(dir.ends_with(".cmdref/cache"));
    }

    #[test]
    fn resolved_dir_keeps_explicit_path() {
        let cache = CacheConfig {
            dir: "/tmp/cmdref-cache".into(),
            ..CacheConfig::default()
        };
        assert_eq!(
            cache.resolved_dir().unwrap(),
            PathBuf::from("/tmp/cmdref-cache")
        );
    }
}
