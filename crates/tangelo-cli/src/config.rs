//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables (`TANGELO_CONFIG` selects the file)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tangelo_core::{TangeloConfig, LIBRARY_VERSION};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings passed to the library
    pub library: TangeloConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log format (compact, full, json)
    pub format: String,

    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            thread_ids: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".tangelo.yaml"),
            PathBuf::from(".tangelo.json"),
            PathBuf::from("tangelo.yaml"),
            PathBuf::from("tangelo.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let tangelo_dir = config_dir.join("tangelo");
            paths.push(tangelo_dir.join("config.yaml"));
            paths.push(tangelo_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".tangelo.yaml"));
            paths.push(home_dir.join(".tangelo.json"));
        }

        paths
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reject a configuration that cannot be used at all
pub fn ensure_usable(config: &Config) -> Result<()> {
    if config.library.api_root.is_empty() {
        return Err(Error::config("api_root must not be empty"));
    }
    Ok(())
}

/// A problem with the library settings that the user's configuration caused.
///
/// The built-in version string does not parse, so it is only checked once a
/// configuration file replaces it.
pub fn library_warning(config: &Config) -> Option<String> {
    let library = &config.library;
    let checked = if library.version == LIBRARY_VERSION {
        library.validate_api_root()
    } else {
        library.validate()
    };
    checked.err().map(|e| e.to_string())
}
