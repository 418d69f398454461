//! Tangelo Core - version checks and data accessors for Tangelo plugins
//!
//! This crate provides the two pieces of logic plugins rely on:
//!
//! - **Version compatibility**: plugins state the library version they were
//!   written against and halt early if the running library cannot satisfy it
//! - **Accessors**: a small configuration grammar (`value`, `index`, `field`)
//!   compiled into functions that read from heterogeneous JSON records
//!
//! plus the in-band error registry and fatal-error reporting they share.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tangelo_core::{Tangelo, TangeloConfig};
//!
//! let tangelo = Tangelo::from_config(TangeloConfig {
//!     version: "1.4.2".to_string(),
//!     ..TangeloConfig::default()
//! });
//!
//! assert!(tangelo.require_compatible_version("1.3"));
//! assert!(!tangelo.require_compatible_version("2.0.0"));
//!
//! let name = tangelo.accessor(Some(&json!({"field": "name"}))).unwrap();
//! assert_eq!(name.get(&json!({"name": "pomelo"})).unwrap(), Some(json!("pomelo")));
//! ```

pub mod accessor;
pub mod config;
pub mod error;
pub mod fatal;
pub mod registry;
pub mod version;

pub use accessor::{accessor, Accessor, AccessorKind, AccessorSpec, FieldPath};
pub use config::{TangeloConfig, DEFAULT_API_ROOT, LIBRARY_VERSION};
pub use error::{Error, Result, VersionSubject};
pub use fatal::{ExitOnFatal, FatalHandler, PanicOnFatal, Unavailable};
pub use registry::{AppError, ErrorRegistry, AJAX_FAILURE, APPLICATION_ERROR};
pub use version::{CompatibilityChecker, ParsedVersion, VersionError};

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

const REQUIRE_VERSION_MODULE: &str = "tangelo.requireCompatibleVersion()";

/// Entry point owning the library version, error registry, and fatal handler.
///
/// Everything it holds is fixed at construction.
#[derive(Clone)]
pub struct Tangelo {
    version: String,
    api_root: String,
    errors: ErrorRegistry,
    fatal: Arc<dyn FatalHandler>,
}

impl Tangelo {
    pub fn new() -> Self {
        Self::from_config(TangeloConfig::default())
    }

    pub fn from_config(config: TangeloConfig) -> Self {
        let mut errors = ErrorRegistry::new();
        for (code, message) in config.error_messages {
            errors.register(code, message);
        }

        Self {
            version: config.version,
            api_root: config.api_root,
            errors,
            fatal: Arc::new(PanicOnFatal),
        }
    }

    /// Replace the fatal handler
    pub fn with_fatal_handler(mut self, handler: Arc<dyn FatalHandler>) -> Self {
        self.fatal = handler;
        self
    }

    /// Report a different library version, keeping everything else
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn errors(&self) -> &ErrorRegistry {
        &self.errors
    }

    /// Check `requirement` against the library version, reporting bad
    /// version strings as errors.
    pub fn check_compatible_version(&self, requirement: &str) -> Result<bool> {
        let actual = ParsedVersion::parse(&self.version).map_err(|source| {
            Error::InvalidVersion {
                subject: VersionSubject::Library,
                value: self.version.clone(),
                source,
            }
        })?;
        let required = ParsedVersion::parse(requirement).map_err(|source| {
            Error::InvalidVersion {
                subject: VersionSubject::Required,
                value: requirement.to_string(),
                source,
            }
        })?;

        let checker = CompatibilityChecker::new();
        let compatible = checker.is_compatible(&required, &actual);
        if compatible {
            debug!(required = %required, actual = %actual, "Version requirement satisfied");
        } else {
            warn!(
                required = %required,
                actual = %actual,
                reasons = ?checker.explain(&required, &actual),
                "Version requirement not satisfied"
            );
        }
        Ok(compatible)
    }

    /// Check `requirement` against the library version. A malformed version
    /// string on either side is fatal.
    pub fn require_compatible_version(&self, requirement: &str) -> bool {
        match self.check_compatible_version(requirement) {
            Ok(compatible) => compatible,
            Err(Error::InvalidVersion {
                subject: VersionSubject::Library,
                value,
                ..
            }) => self.fatal_error(
                Some(REQUIRE_VERSION_MODULE),
                &format!("tangelo version number is invalid: {}", value),
            ),
            Err(Error::InvalidVersion { value, .. }) => self.fatal_error(
                Some(REQUIRE_VERSION_MODULE),
                &format!("invalid version string: {}", value),
            ),
            Err(e) => self.fatal_error(Some(REQUIRE_VERSION_MODULE), &e.to_string()),
        }
    }

    /// Compile an accessor from its JSON spec
    pub fn accessor(&self, spec: Option<&Value>) -> Result<Accessor> {
        accessor::accessor(spec)
    }

    /// An in-band error carrying the registered message for `code`
    pub fn error(&self, code: u32) -> AppError {
        AppError::from_registry(&self.errors, code)
    }

    pub fn error_with_message(&self, code: u32, message: impl Into<String>) -> AppError {
        AppError::with_message(code, message)
    }

    /// Halt through the configured fatal handler
    pub fn fatal_error(&self, module: Option<&str>, message: &str) -> ! {
        self.fatal.fatal(module, message)
    }

    /// A stand-in for a plugin dependency that failed to load
    pub fn unavailable(&self, plugin: impl Into<String>, required: &[&str]) -> Unavailable {
        Unavailable::new(plugin, required, Arc::clone(&self.fatal))
    }
}

impl Default for Tangelo {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tangelo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tangelo")
            .field("version", &self.version)
            .field("api_root", &self.api_root)
            .field("errors", &self.errors)
            .finish()
    }
}

/// The library version
pub fn version() -> &'static str {
    LIBRARY_VERSION
}

/// [`Tangelo::require_compatible_version`] on a default instance
pub fn require_compatible_version(requirement: &str) -> bool {
    Tangelo::new().require_compatible_version(requirement)
}

/// [`Tangelo::check_compatible_version`] on a default instance
pub fn check_compatible_version(requirement: &str) -> Result<bool> {
    Tangelo::new().check_compatible_version(requirement)
}
