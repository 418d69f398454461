//! Check command handler

use crate::cli::CheckArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use colored::Colorize;
use serde::Serialize;
use tangelo_core::{CompatibilityChecker, ParsedVersion, Tangelo};
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
struct CheckReport {
    required: String,
    actual: String,
    compatible: bool,
    reasons: Vec<String>,
}

/// Handle the check command
#[instrument(skip(tangelo, output), fields(requirement = %args.requirement))]
pub fn handle_check(args: CheckArgs, tangelo: &Tangelo, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("check_command");

    let target = match &args.against {
        Some(version) => {
            output.info(&format!("Checking against {} instead of {}", version, tangelo.version()))?;
            tangelo.clone().with_version(version.as_str())
        }
        None => tangelo.clone(),
    };

    let compatible = if args.fatal {
        target.require_compatible_version(&args.requirement)
    } else {
        target.check_compatible_version(&args.requirement)?
    };

    // Both strings parsed above
    let required = ParsedVersion::parse(&args.requirement)?;
    let actual = ParsedVersion::parse(target.version())?;
    let reasons = CompatibilityChecker::new().explain(&required, &actual);

    info!(compatible, actual = %actual, "Version check finished");

    let report = CheckReport {
        required: required.to_string(),
        actual: actual.to_string(),
        compatible,
        reasons,
    };

    output.result(&report, |color| {
        let verdict = match (compatible, color) {
            (true, true) => "compatible".green().bold().to_string(),
            (false, true) => "incompatible".red().bold().to_string(),
            (true, false) => "compatible".to_string(),
            (false, false) => "incompatible".to_string(),
        };
        let mut text = format!("{} is {} with {}", report.required, verdict, report.actual);
        for reason in &report.reasons {
            text.push_str(&format!("\n  • {}", reason));
        }
        text
    })?;

    if compatible {
        Ok(())
    } else {
        Err(Error::Incompatible {
            required: report.required,
            actual: report.actual,
        })
    }
}
