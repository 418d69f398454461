//! Version string parsing
//!
//! Major version 0 numbers have two parts (`0.MINOR`), every other major
//! version has three (`MAJOR.MINOR.PATCH`). Missing trailing parts are filled
//! with zeros. Any version may carry a trailing `-TAG` with no spaces in it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A parsed, normalized version number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParsedVersion {
    components: Vec<u64>,
    tag: Option<String>,
}

impl ParsedVersion {
    /// Parse a version string
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let (body, tag) = split_tag(raw);

        if body.is_empty() {
            return Err(VersionError::EmptyVersion {
                input: raw.to_string(),
            });
        }

        if let Some(tag) = tag {
            if tag.is_empty() || tag.contains(' ') {
                return Err(VersionError::InvalidTag {
                    input: raw.to_string(),
                    tag: tag.to_string(),
                });
            }
        }

        let mut components = body
            .split('.')
            .map(|piece| {
                parse_component(piece).ok_or_else(|| VersionError::InvalidComponent {
                    input: raw.to_string(),
                    component: piece.to_string(),
                })
            })
            .collect::<Result<Vec<u64>, _>>()?;

        if components.is_empty() {
            return Err(VersionError::EmptyVersion {
                input: raw.to_string(),
            });
        }

        let required = required_components(components[0]);
        if components.len() > required {
            return Err(VersionError::TooManyComponents {
                input: raw.to_string(),
                found: components.len(),
                allowed: required,
            });
        }
        components.resize(required, 0);

        Ok(Self {
            components,
            tag: tag.map(str::to_string),
        })
    }

    /// Build a version from already-normalized parts.
    ///
    /// `minor` and `patch` are dropped or kept according to the major
    /// version, the same way [`ParsedVersion::parse`] pads its input.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let mut components = vec![major, minor, patch];
        components.truncate(required_components(major));
        Self {
            components,
            tag: None,
        }
    }

    /// Attach a tag, validating it the same way the parser does
    pub fn with_tag(mut self, tag: impl Into<String>) -> Result<Self, VersionError> {
        let tag = tag.into();
        if tag.is_empty() || tag.contains(' ') || tag.contains('-') {
            return Err(VersionError::InvalidTag {
                input: format!("{}-{}", self, tag),
                tag,
            });
        }
        self.tag = Some(tag);
        Ok(self)
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    pub fn major(&self) -> u64 {
        self.components[0]
    }

    pub fn minor(&self) -> u64 {
        self.components[1]
    }

    /// Patch level; major version 0 numbers have none and report 0
    pub fn patch(&self) -> u64 {
        self.components.get(2).copied().unwrap_or(0)
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }
}

/// Everything before the last hyphen is the body, the rest is the tag.
fn split_tag(raw: &str) -> (&str, Option<&str>) {
    match raw.rfind('-') {
        Some(pos) => (&raw[..pos], Some(&raw[pos + 1..])),
        None => (raw, None),
    }
}

// Empty pieces ("1.", "1..2") are rejected, not read as zero
fn parse_component(piece: &str) -> Option<u64> {
    if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    piece.parse().ok()
}

fn required_components(major: u64) -> usize {
    if major == 0 {
        2
    } else {
        3
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .components
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", body)?;
        if let Some(ref tag) = self.tag {
            write!(f, "-{}", tag)?;
        }
        Ok(())
    }
}

impl FromStr for ParsedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ParsedVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ParsedVersion> for String {
    fn from(version: ParsedVersion) -> Self {
        version.to_string()
    }
}

/// Version parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("no version number in '{input}'")]
    EmptyVersion { input: String },

    #[error("invalid tag '{tag}' in '{input}'")]
    InvalidTag { input: String, tag: String },

    #[error("invalid version component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },

    #[error("'{input}' has {found} components, at most {allowed} allowed")]
    TooManyComponents {
        input: String,
        found: usize,
        allowed: usize,
    },
}
