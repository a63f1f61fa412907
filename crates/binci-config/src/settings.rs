//! User settings for binci
//!
//! Located at `~/.config/binci/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-level binci settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub defaults: DefaultsConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Container runtime command ("docker" or "podman")
    pub runtime: String,
    /// Directory the generated execution script is written to
    pub tmp_dir: Option<PathBuf>,
    /// Skip starting linked services
    pub disable_services: bool,
    /// Seconds to wait when stopping service containers
    pub stop_timeout: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            tmp_dir: None,
            disable_services: false,
            stop_timeout: 10,
        }
    }
}

impl DefaultsConfig {
    /// Script directory, falling back to `<os tmp>/binci`
    pub fn effective_tmp_dir(&self) -> PathBuf {
        self.tmp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("binci"))
    }
}

impl Settings {
    /// Load settings from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(
            "Loaded settings from {:?}: runtime={}",
            path,
            settings.defaults.runtime
        );

        Ok(settings)
    }

    /// Get the default settings file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "binci").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
