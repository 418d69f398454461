//! In-band application errors
//!
//! These are errors an application is expected to recover from, for
//! instance by showing a message and asking the user to try again. Each has
//! an integer code; the [`ErrorRegistry`] maps codes to default messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const AJAX_FAILURE: u32 = 0;
pub const APPLICATION_ERROR: u32 = 1;

/// Map from error code to human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRegistry {
    messages: BTreeMap<u32, String>,
}

impl ErrorRegistry {
    /// A registry holding only the built-in codes
    pub fn new() -> Self {
        let mut registry = Self {
            messages: BTreeMap::new(),
        };
        registry.register(AJAX_FAILURE, "ajax failure");
        registry.register(APPLICATION_ERROR, "application error");
        registry
    }

    /// Add or replace the message for a code
    pub fn register(&mut self, code: u32, message: impl Into<String>) -> &mut Self {
        self.messages.insert(code, message.into());
        self
    }

    /// The message for `code`, or a generic one if it is not registered
    pub fn message(&self, code: u32) -> String {
        self.messages
            .get(&code)
            .cloned()
            .unwrap_or_else(|| format!("unrecognized error, code {}", code))
    }

    pub fn contains(&self, code: u32) -> bool {
        self.messages.contains_key(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.messages.iter().map(|(code, msg)| (*code, msg.as_str()))
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A recoverable error reported back to the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppError {
    pub code: u32,
    pub message: String,
    /// Whatever the failed request left behind, such as a response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl AppError {
    /// An error using the registered message for `code`
    pub fn from_registry(registry: &ErrorRegistry, code: u32) -> Self {
        Self {
            code,
            message: registry.message(code),
            context: None,
        }
    }

    pub fn with_message(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for AppError {}
