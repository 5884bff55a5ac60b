//! Configuration types for pantry.
//!
//! [`Config::load`] reads `~/.config/pantry/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
base_url           = "http://localhost:8000"
request_timeout_ms = 5000

[search]
fetch_debounce_ms   = 50
live_debounce_ms    = 500
suggest_debounce_ms = 300
live_limit          = 20
min_query_len       = 2
max_suggestions     = 8
widen_threshold     = 5

[filter]
default_max_time = 180

[favorites]
key = "recipe-favorites"
# path = "/path/to/favorites.json"

[dataset]
# path = "/path/to/recipes.json"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/pantry/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

/// `[source]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String { "http://localhost:8000".to_string() }
fn default_request_timeout_ms() -> u64 { 5000 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_fetch_debounce_ms")]
    pub fetch_debounce_ms: u64,
    #[serde(default = "default_live_debounce_ms")]
    pub live_debounce_ms: u64,
    #[serde(default = "default_suggest_debounce_ms")]
    pub suggest_debounce_ms: u64,
    #[serde(default = "default_live_limit")]
    pub live_limit: usize,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_widen_threshold")]
    pub widen_threshold: usize,
}

fn default_fetch_debounce_ms() -> u64 { 50 }
fn default_live_debounce_ms() -> u64 { 500 }
fn default_suggest_debounce_ms() -> u64 { 300 }
fn default_live_limit() -> usize { 20 }
fn default_min_query_len() -> usize { 2 }
fn default_max_suggestions() -> usize { 8 }
fn default_widen_threshold() -> usize { 5 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fetch_debounce_ms: default_fetch_debounce_ms(),
            live_debounce_ms: default_live_debounce_ms(),
            suggest_debounce_ms: default_suggest_debounce_ms(),
            live_limit: default_live_limit(),
            min_query_len: default_min_query_len(),
            max_suggestions: default_max_suggestions(),
            widen_threshold: default_widen_threshold(),
        }
    }
}

/// `[filter]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_max_time")]
    pub default_max_time: u32,
}

fn default_max_time() -> u32 { crate::types::DEFAULT_MAX_TIME }

impl Default for FilterConfig {
    fn default() -> Self {
        Self { default_max_time: default_max_time() }
    }
}

/// `[favorites]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoritesConfig {
    #[serde(default = "default_favorites_key")]
    pub key: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_favorites_key() -> String { crate::favorites::DEFAULT_FAVORITES_KEY.to_string() }

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            key: default_favorites_key(),
            path: None,
        }
    }
}

impl FavoritesConfig {
    /// The configured path, or `<data dir>/pantry/favorites.json`.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| data_dir().join("favorites.json"))
    }
}

/// `[dataset]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/pantry/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(Some(path))
    }

    /// Built-in defaults with `path` layered on top, if it exists.
    pub fn layered(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home().join(".config"))
        .join("pantry")
        .join("config.toml")
}

fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home().join(".local").join("share"))
        .join("pantry")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.source.base_url, "http://localhost:8000");
        assert_eq!(cfg.search.live_debounce_ms, 500);
        assert_eq!(cfg.search.suggest_debounce_ms, 300);
        assert_eq!(cfg.search.max_suggestions, 8);
        assert_eq!(cfg.filter.default_max_time, 180);
        assert_eq!(cfg.favorites.key, "recipe-favorites");
        assert!(cfg.dataset.path.is_none());
    }

    #[test]
    fn user_file_overrides_single_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\nlive_debounce_ms = 750\n").unwrap();

        let cfg = Config::layered(Some(path)).unwrap();
        assert_eq!(cfg.search.live_debounce_ms, 750);
        assert_eq!(cfg.search.suggest_debounce_ms, 300);
    }

    #[test]
    fn explicit_favorites_path_wins() {
        let cfg = FavoritesConfig {
            path: Some(PathBuf::from("/tmp/favs.json")),
            ..FavoritesConfig::default()
        };
        assert_eq!(cfg.resolved_path(), PathBuf::from("/tmp/favs.json"));
    }
}
