//! Generator configuration.
//!
//! Loaded from an explicit file, or from `$XDG_CONFIG_HOME/sodium-typegen/config.toml`
//! when that exists. Every field is optional.
//!
//! ```toml
//! archive_url = "https://github.com/jedisct1/libsodium.js/archive/{version}.zip"
//! library = "libsodium.js"
//! default_version = "0.7.3"
//! minimum_version = "0.7.3"
//! ```

use crate::error::{Error, Result};
use crate::version::MINIMUM_VERSION;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Release archive location; `{version}` is substituted.
    pub archive_url: String,
    /// Archive top-level directory prefix (`<library>-<version>`).
    pub library: String,
    /// Version downloaded when none is requested.
    pub default_version: String,
    pub minimum_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            archive_url: "https://github.com/jedisct1/libsodium.js/archive/{version}.zip"
                .to_string(),
            library: "libsodium.js".to_string(),
            default_version: MINIMUM_VERSION.to_string(),
            minimum_version: MINIMUM_VERSION.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Archive URL for `version`.
    pub fn archive_url(&self, version: &str) -> String {
        self.archive_url.replace("{version}", version)
    }

    /// Load `explicit` if given, otherwise the global config file if it exists,
    /// otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => match Self::global_config_path() {
                Some(path) if path.is_file() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("sodium-typegen").join("config.toml"))
    }
}
