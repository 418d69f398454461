//! Version parsing and compatibility rules
//!
//! This module provides:
//! - Parsing of `MAJOR.MINOR.PATCH[-TAG]` / `0.MINOR[-TAG]` version strings
//! - The compatibility rule plugins use to check the host library version

pub mod compatibility;
pub mod parser;

pub use compatibility::CompatibilityChecker;
pub use parser::{ParsedVersion, VersionError};

/// Check if `actual` satisfies `required`
pub fn is_compatible(required: &ParsedVersion, actual: &ParsedVersion) -> bool {
    CompatibilityChecker::new().is_compatible(required, actual)
}
