//! sap-car CLI - Command-line utility for listing and idempotently
//! extracting SAPCAR archives.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use sapcar_core::Context;
use sapcar_core::SapcarConfig;
use sapcar_core::check_available;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(code) => code,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Errors are formatted by the caller. A failed state result has already
/// been printed and only sets the exit code.
fn run(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<ExitCode> {
    if let cli::Commands::Completion { shell } = &cli.command {
        commands::completion::execute(*shell);
        return Ok(ExitCode::SUCCESS);
    }

    let config = SapcarConfig {
        binary: cli.sapcar.clone(),
        timeout: cli.timeout,
        ..Default::default()
    };
    let binary = check_available(&config)
        .map_err(|e| error::convert_sapcar_error(e, &config.binary))?;
    tracing::debug!(binary = %binary.display(), "using SAPCAR");
    let ctx = Context::system(config).context("failed to resolve the current user and group")?;

    match &cli.command {
        cli::Commands::List(args) => commands::list::execute(args, &ctx, formatter)?,
        cli::Commands::Extract(args) => commands::extract::execute(args, &ctx, formatter)?,
        cli::Commands::Extracted(args) => {
            return commands::extracted::execute(args, ctx, formatter);
        }
        cli::Commands::Completion { .. } => {}
    }
    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so stdout stays parseable; `RUST_LOG` overrides the
/// level picked from the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .init();
}
