//! Core domain types for the FleetFit engine.
//!
//! This crate defines vehicle types, the read-only catalog abstraction,
//! priced combinations, and the [`Optimizer`] trait implemented by solver
//! crates. Constructors return `Result` so invalid input surfaces early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod allocation;
mod catalog;
mod combination;
mod optimizer;
mod pricing;
mod request;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
mod vehicle;

pub use allocation::{
    AllocationError, AllocationRequest, ConfirmedAllocation, ProposedVehicle, confirm_allocation,
};
pub use catalog::{CatalogError, CatalogSnapshot, VehicleCatalog};
pub use combination::{AllocationEntry, CombinationError, RankKey, VehicleCombination};
pub use optimizer::{OptimizeError, Optimizer};
pub use pricing::{PriceQuote, PricingError, billable_days, price};
pub use request::{
    DEFAULT_MAX_SOLUTIONS, Diagnostics, MAX_SOLUTIONS_LIMIT, OptimizeRequest,
    OptimizeRequestValidationError, OptimizeResponse,
};
#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub use store::{SqliteVehicleCatalog, SqliteVehicleCatalogError};
pub use vehicle::{VehicleType, VehicleTypeError, VehicleTypeId};
