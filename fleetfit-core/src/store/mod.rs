//! Persistent catalog backends.
//!
//! The engine only sees the [`VehicleCatalog`](crate::VehicleCatalog) trait.
//! Backends in this module adapt concrete storage to it.

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteVehicleCatalog, SqliteVehicleCatalogError, VEHICLE_TYPES_SCHEMA};
