use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::thresholds::ThresholdSet;

pub const DEFAULT_FIGMA_BASE_URL: &str = "https://api.figma.com";
pub const DEFAULT_STORE_PATH: &str = "uxa.db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: ThresholdSet,
    pub store: StoreConfig,
    pub figma: FigmaConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file holding analysis records
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigmaConfig {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FIGMA_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    /// `~/.config/uxa/config.toml`, when a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("uxa").join("config.toml"))
    }

    /// Load from an explicit path, else the central config if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::central_config_path() {
                Some(central) if central.is_file() => Self::from_file(&central),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.thresholds.validate()?;
        if self.figma.timeout.is_zero() {
            return Err("figma.timeout must be greater than zero".to_string());
        }
        url::Url::parse(&self.figma.base_url)
            .map_err(|e| format!("figma.base_url '{}' is not a URL: {e}", self.figma.base_url))?;
        if self.store.path.as_os_str().is_empty() {
            return Err("store.path must not be empty".to_string());
        }
        Ok(())
    }
}
