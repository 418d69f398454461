//! Version compatibility checking
//!
//! Tagged versions and major version 0 versions are only compatible with an
//! exact match. Otherwise the major versions must agree and the required
//! minor/patch pair must not be newer than the actual one.

use crate::version::parser::ParsedVersion;

/// Applies the compatibility rules between a required and an actual version
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityChecker;

impl CompatibilityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check if `actual` satisfies `required`
    pub fn is_compatible(&self, required: &ParsedVersion, actual: &ParsedVersion) -> bool {
        if requires_exact_match(required, actual) {
            return required == actual;
        }

        required.major() == actual.major()
            && (required.minor() < actual.minor()
                || (required.minor() == actual.minor() && required.patch() <= actual.patch()))
    }

    /// Reasons `actual` does not satisfy `required`; empty when compatible
    pub fn explain(&self, required: &ParsedVersion, actual: &ParsedVersion) -> Vec<String> {
        let mut reasons = Vec::new();

        if requires_exact_match(required, actual) {
            if required.tag() != actual.tag() {
                reasons.push(format!(
                    "Tag mismatch: required {}, found {}",
                    describe_tag(required.tag()),
                    describe_tag(actual.tag())
                ));
            }
            if required.components() != actual.components() {
                reasons.push(format!(
                    "Exact match required for tagged or 0.x versions: required {}, found {}",
                    required, actual
                ));
            }
            return reasons;
        }

        if required.major() != actual.major() {
            reasons.push(format!(
                "Major version mismatch: required v{}, found v{}",
                required.major(),
                actual.major()
            ));
        } else if required.minor() > actual.minor() {
            reasons.push(format!(
                "Required minor version ({}) is newer than available ({})",
                required.minor(),
                actual.minor()
            ));
        } else if required.minor() == actual.minor() && required.patch() > actual.patch() {
            reasons.push(format!(
                "Required patch level ({}) is newer than available ({})",
                required.patch(),
                actual.patch()
            ));
        }

        reasons
    }
}

fn requires_exact_match(required: &ParsedVersion, actual: &ParsedVersion) -> bool {
    required.is_tagged() || actual.is_tagged() || required.major() == 0 || actual.major() == 0
}

fn describe_tag(tag: Option<&str>) -> String {
    match tag {
        Some(tag) => format!("'{}'", tag),
        None => "no tag".to_string(),
    }
}
