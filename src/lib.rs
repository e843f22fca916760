//! Facade crate for the Fleetfit vehicle combination engine.
//!
//! This crate re-exports the core domain types and exposes the combination
//! solver and the SQLite catalog behind feature flags.

#![forbid(unsafe_code)]

pub use fleetfit_core::{
    AllocationEntry, AllocationError, AllocationRequest, CatalogError, CatalogSnapshot,
    CombinationError, ConfirmedAllocation, DEFAULT_MAX_SOLUTIONS, Diagnostics,
    MAX_SOLUTIONS_LIMIT, OptimizeError, OptimizeRequest, OptimizeRequestValidationError,
    OptimizeResponse, Optimizer, PriceQuote, PricingError, ProposedVehicle, RankKey,
    VehicleCatalog, VehicleCombination, VehicleType, VehicleTypeError, VehicleTypeId,
    billable_days, confirm_allocation, price,
};

#[cfg(feature = "store-sqlite")]
pub use fleetfit_core::{SqliteVehicleCatalog, SqliteVehicleCatalogError};

#[cfg(feature = "solver")]
pub use fleetfit_solver::{BudgetExhausted, CombinationSolver, SolverConfig};

#[cfg(feature = "test-support")]
pub use fleetfit_core::test_support;
