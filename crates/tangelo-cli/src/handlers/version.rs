//! Version and parse command handlers

use crate::cli::ParseArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use colored::Colorize;
use serde::Serialize;
use tangelo_core::{ParsedVersion, Tangelo};
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct VersionReport<'a> {
    version: &'a str,
    api_root: &'a str,
    /// Whether the version string passes the library's own parser
    parseable: bool,
}

#[derive(Debug, Serialize)]
struct ParseReport {
    input: String,
    components: Vec<u64>,
    tag: Option<String>,
    normalized: String,
}

/// Handle the version command
pub fn handle_version(tangelo: &Tangelo, output: &mut OutputWriter) -> Result<()> {
    let parsed = ParsedVersion::parse(tangelo.version());
    let report = VersionReport {
        version: tangelo.version(),
        api_root: tangelo.api_root(),
        parseable: parsed.is_ok(),
    };

    output.result(&report, |color| {
        let version = if color {
            report.version.bold().to_string()
        } else {
            report.version.to_string()
        };
        format!("tangelo {}\nAPI root: {}", version, report.api_root)
    })?;

    if let Err(e) = parsed {
        output.warning(&format!(
            "The library version does not parse ({}); version checks against it will fail",
            e
        ))?;
    }

    Ok(())
}

/// Handle the parse command
#[instrument(skip(output))]
pub fn handle_parse(args: ParseArgs, output: &mut OutputWriter) -> Result<()> {
    let parsed = ParsedVersion::parse(&args.version)?;
    debug!(parsed = %parsed, "Parsed version");

    let report = ParseReport {
        input: args.version,
        components: parsed.components().to_vec(),
        tag: parsed.tag().map(str::to_string),
        normalized: parsed.to_string(),
    };

    output.result(&report, |_| {
        let mut text = format!("Normalized: {}\n", report.normalized);
        text.push_str(&format!(
            "Components: {}\n",
            report
                .components
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));
        text.push_str(&format!(
            "Tag: {}",
            report.tag.as_deref().unwrap_or("(none)")
        ));
        text
    })
}
