//! Error command handler

use crate::cli::ErrorArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use colored::Colorize;
use tangelo_core::Tangelo;
use tracing::debug;

/// Handle the error command
pub fn handle_error(args: ErrorArgs, tangelo: &Tangelo, output: &mut OutputWriter) -> Result<()> {
    let error = match args.message {
        Some(message) => tangelo.error_with_message(args.code, message),
        None => tangelo.error(args.code),
    };
    debug!(code = error.code, registered = tangelo.errors().contains(args.code), "Built error object");

    output.result(&error, |color| {
        if color {
            format!("{} {}", format!("[{}]", error.code).red().bold(), error.message)
        } else {
            format!("[{}] {}", error.code, error.message)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::testing::writer;

    fn args(code: u32, message: Option<&str>) -> ErrorArgs {
        ErrorArgs {
            code,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_registered_message() {
        let (mut out, buffer) = writer(OutputFormat::Json, false);
        handle_error(args(0, None), &Tangelo::new(), &mut out).unwrap();
        assert_eq!(buffer.contents(), "{\"code\":0,\"message\":\"ajax failure\"}\n");
    }

    #[test]
    fn test_message_override() {
        let (mut out, buffer) = writer(OutputFormat::Json, false);
        handle_error(args(1, Some("disk full")), &Tangelo::new(), &mut out).unwrap();
        assert_eq!(buffer.contents(), "{\"code\":1,\"message\":\"disk full\"}\n");
    }

    #[test]
    fn test_unknown_code_human() {
        let (mut out, buffer) = writer(OutputFormat::Human, false);
        handle_error(args(7, None), &Tangelo::new(), &mut out).unwrap();
        assert_eq!(buffer.contents(), "[7] unrecognized error, code 7\n");
    }
}
