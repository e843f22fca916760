//! Optimize command implementation for the Fleetfit CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use fleetfit_core::{OptimizeRequest, OptimizeResponse, Optimizer, SqliteVehicleCatalog};
use fleetfit_solver::{CombinationSolver, SolverConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{load_json, require_existing, write_json};
use crate::{
    ARG_CATALOG_DB, ARG_OPTIMIZE_REQUEST, ARG_TIME_LIMIT_MS, CliError, DEFAULT_CATALOG_DB,
    ENV_OPTIMIZE_REQUEST,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Choose vehicle combinations for a party by searching the \
                 active vehicle types in a SQLite catalog. The request is \
                 provided as a JSON-encoded OptimizeRequest.",
    about = "Recommend vehicle combinations for a trip"
)]
#[ortho_config(prefix = "FLEETFIT")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing an OptimizeRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the SQLite vehicle catalog.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Abandon the search after this many milliseconds.
    #[arg(long = ARG_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the catalog database.
    pub(crate) catalog_db: Utf8PathBuf,
    /// Search limit handed to the solver.
    pub(crate) time_limit: Option<Duration>,
}

impl OptimizeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_OPTIMIZE_REQUEST)?;
        require_existing(&self.catalog_db, ARG_CATALOG_DB)?;
        Ok(())
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            time_limit: self.time_limit,
            ..SolverConfig::default()
        }
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIMIZE_REQUEST,
            env: ENV_OPTIMIZE_REQUEST,
        })?;
        let catalog_db = args
            .catalog_db
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG_DB));
        Ok(Self {
            request_path,
            catalog_db,
            time_limit: args.time_limit_ms.map(Duration::from_millis),
        })
    }
}

/// Builds an optimiser for the current invocation.
pub(crate) trait OptimizerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn Optimizer>, CliError>;
}

pub(crate) struct DefaultOptimizerBuilder;

impl OptimizerBuilder for DefaultOptimizerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn Optimizer>, CliError> {
        let catalog = SqliteVehicleCatalog::open(config.catalog_db.as_std_path())?;
        Ok(Box::new(CombinationSolver::with_config(
            catalog,
            config.solver_config(),
        )))
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimize_with(args, &DefaultOptimizerBuilder, &mut stdout)
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_optimize(args, builder)?;
    write_json(writer, &response)
}

fn execute_optimize(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
) -> Result<OptimizeResponse, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_optimize_request(&config)?;
    let optimizer = builder.build(&config)?;
    let response = optimizer
        .optimize(&request)
        .map_err(|source| CliError::Optimize { source })?;
    log::debug!(
        "optimised {} in {:?} over {} nodes",
        config.request_path,
        response.diagnostics.solve_time,
        response.diagnostics.nodes_explored
    );
    Ok(response)
}

/// Loads and validates the JSON-encoded request named by `config`.
pub(crate) fn load_optimize_request(config: &OptimizeConfig) -> Result<OptimizeRequest, CliError> {
    let request: OptimizeRequest = load_json(&config.request_path, ARG_OPTIMIZE_REQUEST)?;
    request
        .validate_detailed()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    Ok(request)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
