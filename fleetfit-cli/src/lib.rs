//! Command-line interface for the Fleetfit optimisation engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod optimize;
mod quote;

pub use error::CliError;

use optimize::{OptimizeArgs, run_optimize};
use quote::{QuoteArgs, run_quote};

const ARG_OPTIMIZE_REQUEST: &str = "request-path";
const ARG_QUOTE_BOOKING: &str = "booking-path";
const ARG_CATALOG_DB: &str = "catalog-db";
const ARG_TIME_LIMIT_MS: &str = "time-limit-ms";
const ENV_OPTIMIZE_REQUEST: &str = "FLEETFIT_CMDS_OPTIMIZE_REQUEST_PATH";
const ENV_QUOTE_BOOKING: &str = "FLEETFIT_CMDS_QUOTE_BOOKING_PATH";
const DEFAULT_CATALOG_DB: &str = "catalog.db";

/// Run the Fleetfit CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init()?;
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
        Command::Quote(args) => run_quote(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fleetfit",
    about = "Vehicle combination optimisation for group trips",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend vehicle combinations for a party and trip length.
    Optimize(OptimizeArgs),
    /// Re-validate and price a proposed allocation.
    Quote(QuoteArgs),
}

#[cfg(test)]
mod tests;
