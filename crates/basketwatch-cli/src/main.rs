mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        tracing::debug!(exit_code = err.exit_code(), "command failed");
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let response = commands::run(cli)?;
    output::render(&response, cli.format, cli.pretty)?;

    let envelope = &response.envelope;
    if cli.strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    if !envelope.errors.is_empty() {
        return Err(CliError::Response(envelope.errors.len()));
    }

    Ok(())
}
