//! Log subscriber installation for the `fleetfit` binary.

use tracing_subscriber::EnvFilter;

use crate::CliError;

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Install a stderr formatter honouring `RUST_LOG`.
///
/// Library crates log through the `log` facade; the subscriber bridges those
/// records so they share one formatter with any `tracing` events.
pub(crate) fn init() -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::InitLogging {
            message: err.to_string(),
        })
}
