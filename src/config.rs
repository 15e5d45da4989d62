//! Configuration for the editor

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "KILO_CONFIG";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw-mode read timeout in tenths of a second (VTIME)
    pub input_timeout_ds: u8,
    /// Move the cursor with w/a/s/d as well as the arrow keys
    pub wasd_navigation: bool,
    /// Write logs here; no logging when unset
    pub log_file: Option<PathBuf>,
    /// tracing-subscriber filter directive used when KILO_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_timeout_ds: 1,
            wasd_navigation: false,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `$KILO_CONFIG` or `~/.config/kilo/config.json`, else defaults
    pub fn load_or_default() -> Self {
        config_path()
            .filter(|path| path.exists())
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Read timeout actually applied to the terminal
    pub fn effective_timeout_ds(&self) -> u8 {
        self.input_timeout_ds.max(1)
    }
}

/// Where the config file is looked up
fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("kilo")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
