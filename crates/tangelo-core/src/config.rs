//! Library configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::version::ParsedVersion;

/// The version string this library reports about itself
pub const LIBRARY_VERSION: &str = "0.7.0-dev";

/// Default location of the web API root
pub const DEFAULT_API_ROOT: &str = "/api";

/// Settings a [`crate::Tangelo`] is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TangeloConfig {
    /// Version reported by the library
    pub version: String,

    /// Location of the web API root
    pub api_root: String,

    /// Extra error messages, added on top of the built-in codes
    pub error_messages: BTreeMap<u32, String>,
}

impl Default for TangeloConfig {
    fn default() -> Self {
        Self {
            version: LIBRARY_VERSION.to_string(),
            api_root: DEFAULT_API_ROOT.to_string(),
            error_messages: BTreeMap::new(),
        }
    }
}

impl TangeloConfig {
    /// Check the configured values without building anything
    pub fn validate(&self) -> Result<()> {
        self.validate_version()?;
        self.validate_api_root()
    }

    pub fn validate_version(&self) -> Result<()> {
        ParsedVersion::parse(&self.version)
            .map(|_| ())
            .map_err(|e| Error::Configuration {
                message: format!("version '{}' is not valid: {}", self.version, e),
            })
    }

    pub fn validate_api_root(&self) -> Result<()> {
        if !self.api_root.starts_with('/') {
            return Err(Error::Configuration {
                message: format!("api_root '{}' must start with '/'", self.api_root),
            });
        }
        Ok(())
    }
}
