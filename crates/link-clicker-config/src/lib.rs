use link_clicker_engine::{NewFileLocation, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Persisted link-clicker configuration.
///
/// Only `vault_path` is required; missing click settings and the new-file
/// location fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub vault_path: PathBuf,
    #[serde(default)]
    pub clicks: Settings,
    #[serde(default)]
    pub new_file_location: NewFileLocation,
}

impl Config {
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
            clicks: Settings::default(),
            new_file_location: NewFileLocation::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.vault_path = Self::expand_path(&config.vault_path).unwrap_or(config.vault_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        log::debug!("saved config to {}", config_path.display());
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/link-clicker");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and environment variables.
    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}
