//! Quote command: re-validate and price a proposed allocation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fleetfit_core::{
    AllocationRequest, ConfirmedAllocation, SqliteVehicleCatalog, confirm_allocation,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{load_json, require_existing, write_json};
use crate::{ARG_CATALOG_DB, ARG_QUOTE_BOOKING, CliError, DEFAULT_CATALOG_DB, ENV_QUOTE_BOOKING};

/// CLI arguments for the `quote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Check a client-chosen set of vehicles against the live \
                 catalog and price it from catalog rates. The booking is \
                 provided as a JSON-encoded AllocationRequest.",
    about = "Re-validate and price a proposed allocation"
)]
#[ortho_config(prefix = "FLEETFIT")]
pub(crate) struct QuoteArgs {
    /// Path to a JSON file containing an AllocationRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) booking_path: Option<Utf8PathBuf>,
    /// Path to the SQLite vehicle catalog.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl QuoteArgs {
    pub(crate) fn into_config(self) -> Result<QuoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QuoteConfig::try_from(merged)
    }
}

/// Resolved `quote` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuoteConfig {
    pub(crate) booking_path: Utf8PathBuf,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl QuoteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.booking_path, ARG_QUOTE_BOOKING)?;
        require_existing(&self.catalog_db, ARG_CATALOG_DB)?;
        Ok(())
    }
}

impl TryFrom<QuoteArgs> for QuoteConfig {
    type Error = CliError;

    fn try_from(args: QuoteArgs) -> Result<Self, Self::Error> {
        let booking_path = args.booking_path.ok_or(CliError::MissingArgument {
            field: ARG_QUOTE_BOOKING,
            env: ENV_QUOTE_BOOKING,
        })?;
        let catalog_db = args
            .catalog_db
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG_DB));
        Ok(Self {
            booking_path,
            catalog_db,
        })
    }
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_quote_with(args, &mut stdout)
}

pub(crate) fn run_quote_with(args: QuoteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let confirmed = execute_quote(&config)?;
    write_json(writer, &confirmed)
}

pub(crate) fn execute_quote(config: &QuoteConfig) -> Result<ConfirmedAllocation, CliError> {
    config.validate_sources()?;
    let booking: AllocationRequest = load_json(&config.booking_path, ARG_QUOTE_BOOKING)?;
    let catalog = SqliteVehicleCatalog::open(config.catalog_db.as_std_path())?;
    confirm_allocation(&catalog, &booking).map_err(|source| CliError::Allocation { source })
}
