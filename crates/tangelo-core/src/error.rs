//! Error types for the Tangelo core library
//!
//! This module defines the error handling for Tangelo using thiserror.
//! Version parsing failures have their own [`VersionError`] which is
//! wrapped as the source of [`Error::InvalidVersion`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::version::VersionError;

/// Main error type for Tangelo operations
#[derive(Error, Debug)]
pub enum Error {
    /// A version string failed to parse
    #[error("invalid {subject} version string: {value}")]
    InvalidVersion {
        subject: VersionSubject,
        value: String,
        #[source]
        source: VersionError,
    },

    /// An accessor spec with none of the recognized keys
    #[error("unknown accessor spec {spec}")]
    UnrecognizedAccessorSpec { spec: Value },

    /// The undefined accessor was called
    #[error("I am an undefined accessor - you shouldn't be calling me!")]
    UndefinedAccessor,

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a compatibility check a version string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSubject {
    /// The version the library reports about itself
    Library,
    /// The version a plugin asked for
    Required,
}

impl fmt::Display for VersionSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSubject::Library => write!(f, "library"),
            VersionSubject::Required => write!(f, "required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::UnrecognizedAccessorSpec {
            spec: json!({"invalid": "quux"}),
        };
        assert_eq!(err.to_string(), r#"unknown accessor spec {"invalid":"quux"}"#);

        let err = Error::InvalidVersion {
            subject: VersionSubject::Required,
            value: "1.x".to_string(),
            source: VersionError::InvalidComponent {
                input: "1.x".to_string(),
                component: "x".to_string(),
            },
        };
        assert_eq!(err.to_string(), "invalid required version string: 1.x");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_subject_display() {
        assert_eq!(VersionSubject::Library.to_string(), "library");
        assert_eq!(VersionSubject::Required.to_string(), "required");
    }
}
