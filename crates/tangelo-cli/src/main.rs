//! Tangelo CLI - Command-line interface for Tangelo plugin support logic
//!
//! This is the main entry point for the Tangelo CLI application, providing
//! commands for checking version requirements, parsing version strings, and
//! evaluating accessor specs against JSON records.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use std::sync::Arc;
use tangelo_core::{ExitOnFatal, Tangelo};
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let result = Config::load_with_file(cli.config.as_deref()).and_then(|config| {
        if let Err(e) = init_logging(&cli, &config) {
            eprintln!("Failed to initialize logging: {}", e);
        }
        run(cli, config)
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    config::ensure_usable(&config)?;
    match config::library_warning(&config) {
        Some(warning) => tracing::warn!(error = %warning, "Library configuration has problems"),
        None => {
            if let Err(e) = config.library.validate() {
                tracing::debug!(error = %e, "Built-in library version does not parse");
            }
        }
    }

    let tangelo = Tangelo::from_config(config.library)
        .with_fatal_handler(Arc::new(ExitOnFatal::default()));

    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Version => handlers::handle_version(&tangelo, &mut output),
        Commands::Check(args) => handlers::handle_check(args, &tangelo, &mut output),
        Commands::Parse(args) => handlers::handle_parse(args, &mut output),
        Commands::Access(args) => handlers::handle_access(args, &tangelo, &mut output),
        Commands::Error(args) => handlers::handle_error(args, &tangelo, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.apply_settings(&config.logging);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
