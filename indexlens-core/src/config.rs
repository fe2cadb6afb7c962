//! Dashboard configuration, loaded from a TOML file.
//!
//! ```toml
//! [data]
//! dir = "public/data"
//! # base_url = "https://example.github.io/index-dashboard/data"
//! cache_buster = true
//!
//! [view]
//! default_index = "topix"
//! current_year = 2026
//! display_cap = 300
//! debounce_ms = 300
//! default_amount = 1000000
//! top_n = 5
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{DirectorySource, DocumentSource, HttpSource, LoadError};
use crate::domain::IndexId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Local directory holding the JSON documents.
    pub dir: PathBuf,
    /// Static HTTP origin. Takes precedence over `dir` when set.
    pub base_url: Option<String>,
    /// Append `?v=<millis>` to HTTP requests.
    pub cache_buster: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DATA_DIR),
            base_url: None,
            cache_buster: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub default_index: IndexId,
    /// Reference year for price windows.
    pub current_year: i32,
    pub display_cap: usize,
    pub debounce_ms: u64,
    pub default_amount: f64,
    /// Categories kept per year in the history view.
    pub top_n: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_index: IndexId::default(),
            current_year: 2026,
            display_cap: crate::views::DEFAULT_DISPLAY_CAP,
            debounce_ms: 300,
            default_amount: 1_000_000.0,
            top_n: crate::views::historical::DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub view: ViewConfig,
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.view.debounce_ms)
    }

    /// The document source this configuration points at.
    pub fn open_source(&self) -> Result<Box<dyn DocumentSource>, LoadError> {
        match &self.data.base_url {
            Some(url) => Ok(Box::new(HttpSource::new(url, self.data.cache_buster)?)),
            None => Ok(Box::new(DirectorySource::new(self.data.dir.clone()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.view.current_year, 2026);
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn partial_sections() {
        let config = DashboardConfig::from_toml(
            r#"
            [data]
            base_url = "https://example.org/data"

            [view]
            default_index = "acwi"
            top_n = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.data.base_url.as_deref(), Some("https://example.org/data"));
        assert!(config.data.cache_buster);
        assert_eq!(config.view.default_index, IndexId::Acwi);
        assert_eq!(config.view.top_n, 8);
        assert_eq!(config.view.display_cap, 300);
    }

    #[test]
    fn unknown_index_is_rejected() {
        let err = DashboardConfig::from_toml("[view]\ndefault_index = \"ftse\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = DashboardConfig::default();
        config.view.default_index = IndexId::Nikkei225;
        let parsed = DashboardConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexlens.toml");
        std::fs::write(&path, "[data]\ndir = \"/srv/data\"\ncache_buster = false\n").unwrap();
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/srv/data"));
        assert!(!config.data.cache_buster);

        let missing = DashboardConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
