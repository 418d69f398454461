//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod access;
mod check;
mod completions;
mod error_code;
mod version;

pub use access::handle_access;
pub use check::handle_check;
pub use completions::handle_completions;
pub use error_code::handle_error;
pub use version::{handle_parse, handle_version};
