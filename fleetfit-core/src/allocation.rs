//! Re-validation of a proposed allocation at booking time.
//!
//! A client may hold on to a solution for a while before booking it. By then
//! vehicle types may have been retired or repriced, so the proposal is checked
//! against the live catalog and re-priced from catalog prices. Prices sent by
//! the client are never trusted.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    AllocationEntry, CatalogError, CombinationError, OptimizeRequestValidationError,
    VehicleCatalog, VehicleCombination, VehicleType, VehicleTypeId, billable_days,
};

/// A vehicle type and count picked by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProposedVehicle {
    /// Identifier of the requested vehicle type.
    pub vehicle_type_id: VehicleTypeId,
    /// Number of vehicles requested.
    pub count: u32,
}

/// An allocation submitted for booking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AllocationRequest {
    /// Travellers who need a seat at booking time.
    pub passenger_count: u32,
    /// Trip length in days.
    pub num_days: Decimal,
    /// Vehicles the client wants to book.
    pub vehicles: Vec<ProposedVehicle>,
}

/// An allocation that passed re-validation, priced from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConfirmedAllocation {
    /// Travellers seated by the allocation.
    pub passenger_count: u32,
    /// Trip length rounded up to whole days.
    pub billable_days: Decimal,
    /// The priced vehicles.
    pub combination: VehicleCombination,
}

/// Errors returned by [`confirm_allocation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Passenger count or trip length was invalid.
    #[error("invalid allocation request: {0}")]
    InvalidRequest(#[from] OptimizeRequestValidationError),
    /// The vehicle type does not exist in the catalog.
    #[error("vehicle type {id} does not exist")]
    UnknownVehicleType {
        /// The unknown identifier.
        id: VehicleTypeId,
    },
    /// The vehicle type exists but is no longer offered.
    #[error("vehicle type {id} is not active")]
    InactiveVehicleType {
        /// The retired identifier.
        id: VehicleTypeId,
    },
    /// The vehicle list itself was malformed or too small.
    #[error(transparent)]
    Combination(#[from] CombinationError),
    /// The catalog could not be read.
    #[error("failed to read vehicle catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Check a proposed allocation against the live catalog and re-price it.
///
/// # Examples
/// ```rust
/// use rust_decimal::Decimal;
/// use fleetfit_core::{
///     AllocationRequest, CatalogError, ProposedVehicle, VehicleCatalog, VehicleType,
///     confirm_allocation,
/// };
///
/// struct FixedCatalog(Vec<VehicleType>);
///
/// impl VehicleCatalog for FixedCatalog {
///     fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let van = VehicleType::new(3, "Van", 12, 10, Decimal::new(2500, 0)).unwrap();
/// let catalog = FixedCatalog(vec![van]);
/// let request = AllocationRequest {
///     passenger_count: 10,
///     num_days: Decimal::new(25, 1),
///     vehicles: vec![ProposedVehicle { vehicle_type_id: 3, count: 1 }],
/// };
///
/// let confirmed = confirm_allocation(&catalog, &request).unwrap();
/// assert_eq!(confirmed.billable_days, Decimal::from(3));
/// assert_eq!(confirmed.combination.total_cost(), Decimal::new(7500, 0));
/// ```
pub fn confirm_allocation<C>(
    catalog: &C,
    request: &AllocationRequest,
) -> Result<ConfirmedAllocation, AllocationError>
where
    C: VehicleCatalog + ?Sized,
{
    validate_trip(request)?;
    check_proposal_shape(&request.vehicles)?;

    let records = catalog.vehicle_types()?;
    let by_id = index_records(&records)?;

    let mut entries = Vec::with_capacity(request.vehicles.len());
    for proposed in &request.vehicles {
        let vehicle_type = by_id
            .get(&proposed.vehicle_type_id)
            .ok_or(AllocationError::UnknownVehicleType {
                id: proposed.vehicle_type_id,
            })?;
        if !vehicle_type.active {
            return Err(AllocationError::InactiveVehicleType {
                id: proposed.vehicle_type_id,
            });
        }
        vehicle_type
            .validate()
            .map_err(|source| CatalogError::InvalidVehicleType {
                id: vehicle_type.id,
                source,
            })?;
        entries.push(AllocationEntry::new(vehicle_type, proposed.count));
    }

    let combination =
        VehicleCombination::new(entries, request.passenger_count, request.num_days)?;
    let billable_days = billable_days(request.num_days).map_err(CombinationError::from)?;
    log::debug!(
        "confirmed allocation of {} vehicles for {} passengers",
        combination.total_vehicle_count(),
        request.passenger_count
    );
    Ok(ConfirmedAllocation {
        passenger_count: request.passenger_count,
        billable_days,
        combination,
    })
}

fn validate_trip(request: &AllocationRequest) -> Result<(), OptimizeRequestValidationError> {
    if request.passenger_count == 0 {
        return Err(OptimizeRequestValidationError::ZeroPassengers);
    }
    if request.num_days <= Decimal::ZERO {
        return Err(OptimizeRequestValidationError::NonPositiveDays {
            num_days: request.num_days,
        });
    }
    Ok(())
}

fn check_proposal_shape(vehicles: &[ProposedVehicle]) -> Result<(), CombinationError> {
    if vehicles.is_empty() {
        return Err(CombinationError::Empty);
    }
    if let Some(zero) = vehicles.iter().find(|proposed| proposed.count == 0) {
        return Err(CombinationError::ZeroCount {
            id: zero.vehicle_type_id,
        });
    }
    let mut seen = HashSet::with_capacity(vehicles.len());
    for proposed in vehicles {
        if !seen.insert(proposed.vehicle_type_id) {
            return Err(CombinationError::DuplicateVehicleType {
                id: proposed.vehicle_type_id,
            });
        }
    }
    Ok(())
}

fn index_records(
    records: &[VehicleType],
) -> Result<HashMap<VehicleTypeId, &VehicleType>, CatalogError> {
    let mut by_id = HashMap::with_capacity(records.len());
    for record in records {
        if by_id.insert(record.id, record).is_some() {
            return Err(CatalogError::DuplicateVehicleType { id: record.id });
        }
    }
    Ok(by_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VehicleTypeError;
    use crate::test_support::{FailingCatalog, MemoryCatalog, sample_fleet, van};
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn catalog() -> MemoryCatalog {
        MemoryCatalog::with_vehicle_types(sample_fleet())
    }

    fn request(vehicles: &[(VehicleTypeId, u32)]) -> AllocationRequest {
        AllocationRequest {
            passenger_count: 10,
            num_days: dec!(1.5),
            vehicles: vehicles
                .iter()
                .map(|&(vehicle_type_id, count)| ProposedVehicle {
                    vehicle_type_id,
                    count,
                })
                .collect(),
        }
    }

    #[rstest]
    fn confirms_and_reprices_from_catalog(catalog: MemoryCatalog) {
        let confirmed = confirm_allocation(&catalog, &request(&[(2, 1), (1, 1)]))
            .expect("allocation should confirm");
        assert_eq!(confirmed.billable_days, dec!(2));
        assert_eq!(confirmed.combination.cost_per_day(), dec!(2500));
        assert_eq!(confirmed.combination.total_cost(), dec!(5000));
        assert_eq!(confirmed.combination.unused_seats(), 1);
    }

    #[rstest]
    fn picks_up_price_changes(catalog: MemoryCatalog) {
        let mut repriced = van();
        repriced.price_per_day = dec!(3000);
        catalog.replace(repriced);
        let confirmed =
            confirm_allocation(&catalog, &request(&[(3, 1)])).expect("allocation should confirm");
        assert_eq!(confirmed.combination.total_cost(), dec!(6000));
    }

    #[rstest]
    fn rejects_deactivated_vehicle(catalog: MemoryCatalog) {
        catalog.set_active(3, false);
        let err = confirm_allocation(&catalog, &request(&[(3, 1)])).expect_err("van retired");
        assert_eq!(err, AllocationError::InactiveVehicleType { id: 3 });
    }

    #[rstest]
    #[case::zero_capacity(
        VehicleType { passenger_capacity: 0, ..van() },
        VehicleTypeError::ZeroCapacity
    )]
    #[case::negative_price(
        VehicleType { price_per_day: dec!(-2500), ..van() },
        VehicleTypeError::NegativePrice { price: dec!(-2500) }
    )]
    fn rejects_corrupt_active_record(
        catalog: MemoryCatalog,
        #[case] corrupt: VehicleType,
        #[case] expected: VehicleTypeError,
    ) {
        catalog.replace(corrupt);
        let err = confirm_allocation(&catalog, &request(&[(3, 1)])).expect_err("corrupt van");
        assert_eq!(
            err,
            AllocationError::Catalog(CatalogError::InvalidVehicleType {
                id: 3,
                source: expected,
            })
        );
    }

    #[rstest]
    #[case(&[(99, 1)], AllocationError::UnknownVehicleType { id: 99 })]
    #[case(&[], AllocationError::Combination(CombinationError::Empty))]
    #[case(
        &[(3, 0)],
        AllocationError::Combination(CombinationError::ZeroCount { id: 3 })
    )]
    #[case(
        &[(2, 1), (2, 1)],
        AllocationError::Combination(CombinationError::DuplicateVehicleType { id: 2 })
    )]
    #[case(
        &[(1, 2)],
        AllocationError::Combination(CombinationError::InsufficientCapacity {
            capacity: 8,
            passenger_count: 10,
        })
    )]
    fn rejects_malformed_proposals(
        catalog: MemoryCatalog,
        #[case] vehicles: &[(VehicleTypeId, u32)],
        #[case] expected: AllocationError,
    ) {
        let err = confirm_allocation(&catalog, &request(vehicles)).expect_err("invalid proposal");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_invalid_trip_before_reading_catalog() {
        let mut invalid = request(&[(3, 1)]);
        invalid.num_days = dec!(0);
        let err = confirm_allocation(&FailingCatalog, &invalid).expect_err("zero days");
        assert_eq!(
            err,
            AllocationError::InvalidRequest(OptimizeRequestValidationError::NonPositiveDays {
                num_days: dec!(0),
            })
        );
    }

    #[rstest]
    fn surfaces_catalog_failures() {
        let err = confirm_allocation(&FailingCatalog, &request(&[(3, 1)]))
            .expect_err("catalog unavailable");
        assert!(matches!(err, AllocationError::Catalog(_)));
    }
}
