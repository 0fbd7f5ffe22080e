// SPDX-License-Identifier: MPL-2.0
//! Loading and saving of user preferences in a `settings.toml` file.
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `CHIPVIEW_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const CONFIG_DIR_ENV: &str = "CHIPVIEW_CONFIG_DIR";

/// Base URL of the detection service when neither the config file nor the
/// `--endpoint` flag provides one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Application theme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
    System,
}

/// Persisted user preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Base URL of the detection service (e.g. `http://localhost:8000`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Application theme mode.
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

impl Config {
    /// Endpoint to use, falling back to [`DEFAULT_ENDPOINT`].
    pub fn endpoint_or_default(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

/// Resolves the directory holding `settings.toml`.
fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|p| p.join("chipview"))
}

/// Resolves the full path of the config file, if a config directory exists.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Loads the config from the default location. A missing file yields the
/// default config; a malformed file is an error.
pub fn load() -> Result<Config> {
    match config_file_path() {
        Some(path) => load_from_path(&path),
        None => Ok(Config::default()),
    }
}

/// Loads the config from an explicit path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

/// Saves the config to the default location.
pub fn save(config: &Config) -> Result<()> {
    match config_file_path() {
        Some(path) => save_to_path(config, &path),
        None => Ok(()),
    }
}

/// Saves the config to an explicit path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
