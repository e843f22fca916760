//! Test-only utilities for `fleetfit-solver`.
//!
//! The helpers in this module are available to unit tests, behaviour tests
//! and benchmarks. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use fleetfit_core::{VehicleType, VehicleTypeId, test_support::MemoryCatalog};
use rust_decimal::Decimal;

use crate::CombinationSolver;

/// Build active vehicle types from `(capacity, price per day)` pairs.
///
/// Identifiers are assigned from 1 in input order.
///
/// # Examples
/// ```rust
/// use fleetfit_solver::test_support::fleet;
///
/// let vehicle_types = fleet(&[(4, 1000), (12, 2500)]);
/// assert_eq!(vehicle_types[1].id, 2);
/// assert_eq!(vehicle_types[1].passenger_capacity, 12);
/// ```
#[must_use]
pub fn fleet(specs: &[(u32, i64)]) -> Vec<VehicleType> {
    (1..)
        .zip(specs)
        .map(|(id, &(passenger_capacity, price))| vehicle(id, passenger_capacity, price))
        .collect()
}

fn vehicle(id: VehicleTypeId, passenger_capacity: u32, price: i64) -> VehicleType {
    VehicleType {
        id,
        name: format!("Type {id}"),
        passenger_capacity,
        luggage_capacity: 0,
        price_per_day: Decimal::from(price),
        active: true,
    }
}

/// Solver over an in-memory catalog holding `vehicle_types`.
#[must_use]
pub fn solver_for(vehicle_types: Vec<VehicleType>) -> CombinationSolver<MemoryCatalog> {
    CombinationSolver::new(MemoryCatalog::with_vehicle_types(vehicle_types))
}
