//! Render options and configuration file loading
//!
//! A configuration file is TOML with two optional sections:
//!
//! ```toml
//! [render]
//! cta_label = "See Deals"
//! image_size = "medium"
//!
//! [store]
//! path = "tables.json"
//! ```
//!
//! Every key has a default, so an empty file (or no file at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::constants::{
    DEFAULT_CTA_LABEL, DEFAULT_IMAGE_SIZE, DEFAULT_MEDAL_URLS, SHORTCODE_TAG, TABLE_ID_PREFIX,
};
use crate::utils::error::{ConfigError, ConfigResult};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "CTABLE_CONFIG";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ctable.toml";

/// Options controlling the rendered fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Medal image URLs for ranks 1, 2 and 3
    pub medal_urls: [String; 3],
    /// Label of the call-to-action button
    pub cta_label: String,
    /// Size keyword passed to the asset resolver
    pub image_size: String,
    /// Prefix of the table element id, followed by the table identifier
    pub table_id_prefix: String,
    /// Shortcode tag recognized in content
    pub shortcode_tag: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            medal_urls: DEFAULT_MEDAL_URLS.map(String::from),
            cta_label: DEFAULT_CTA_LABEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            table_id_prefix: TABLE_ID_PREFIX.to_string(),
            shortcode_tag: SHORTCODE_TAG.to_string(),
        }
    }
}

impl RenderOptions {
    /// Medal URL for a 1-based rank; only ranks 1 to 3 have one
    pub fn medal_url(&self, rank: i64) -> Option<&str> {
        match rank {
            1..=3 => Some(self.medal_urls[(rank - 1) as usize].as_str()),
            _ => None,
        }
    }
}

/// Where the CLI reads tables from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store document path, relative to the working directory
    pub path: Option<PathBuf>,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
    pub store: StoreConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load from an explicit path, then `$CTABLE_CONFIG`, then `./ctable.toml`.
    ///
    /// Only the explicit path and the environment variable are required to
    /// exist; without either, a missing `ctable.toml` gives the defaults.
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self::load(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load(local);
        }
        debug!("no configuration file, using defaults");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.cta_label, "Check Prices");
        assert_eq!(options.image_size, "thumbnail");
        assert_eq!(options.table_id_prefix, "ct-");
        assert_eq!(options.shortcode_tag, "winner_comparison_table");
        assert!(options.medal_urls[0].ends_with("Gold-medal.webp"));
    }

    #[test]
    fn test_medal_url_only_for_podium() {
        let options = RenderOptions::default();
        assert!(options.medal_url(1).unwrap().contains("Gold"));
        assert!(options.medal_url(2).unwrap().contains("Silver"));
        assert!(options.medal_url(3).unwrap().contains("Bronze"));
        assert_eq!(options.medal_url(0), None);
        assert_eq!(options.medal_url(4), None);
        assert_eq!(options.medal_url(-1), None);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str(
            r#"
[render]
cta_label = "See Deals"

[store]
path = "tables.json"
"#,
        )
        .unwrap();
        assert_eq!(config.render.cta_label, "See Deals");
        assert_eq!(config.render.image_size, "thumbnail");
        assert_eq!(config.store.path, Some(PathBuf::from("tables.json")));
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/ctable.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctable.toml");
        fs::write(&path, "[render]\ncta_label = 5\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_discover_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[render]\nimage_size = \"medium\"\n").unwrap();
        let config = Config::discover(Some(&path)).unwrap();
        assert_eq!(config.render.image_size, "medium");
    }
}
