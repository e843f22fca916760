//! Vehicle combinations and their derived metrics.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{PricingError, VehicleType, VehicleTypeId, price};

/// A number of vehicles of one type within a combination.
///
/// The entry copies the fields of the [`VehicleType`] it was built from so a
/// combination remains meaningful after the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AllocationEntry {
    /// Identifier of the vehicle type.
    pub vehicle_type_id: VehicleTypeId,
    /// Display name of the vehicle type.
    pub name: String,
    /// Number of vehicles of this type.
    pub count: u32,
    /// Passenger capacity of one vehicle.
    pub capacity: u32,
    /// Daily price of one vehicle.
    pub price_per_day: Decimal,
}

impl AllocationEntry {
    /// Allocate `count` vehicles of `vehicle_type`.
    pub fn new(vehicle_type: &VehicleType, count: u32) -> Self {
        Self {
            vehicle_type_id: vehicle_type.id,
            name: vehicle_type.name.clone(),
            count,
            capacity: vehicle_type.passenger_capacity,
            price_per_day: vehicle_type.price_per_day,
        }
    }
}

/// Errors returned by [`VehicleCombination::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombinationError {
    /// No vehicles were supplied.
    #[error("combination must contain at least one vehicle")]
    Empty,
    /// An entry allocated zero vehicles.
    #[error("vehicle type {id} must be allocated at least once")]
    ZeroCount {
        /// Identifier of the offending entry.
        id: VehicleTypeId,
    },
    /// Two entries referenced the same vehicle type.
    #[error("vehicle type {id} appears more than once")]
    DuplicateVehicleType {
        /// The repeated identifier.
        id: VehicleTypeId,
    },
    /// The vehicles cannot seat every passenger.
    #[error("capacity {capacity} cannot seat {passenger_count} passengers")]
    InsufficientCapacity {
        /// Seats offered by the combination.
        capacity: u32,
        /// Seats required.
        passenger_count: u32,
    },
    /// Vehicle or seat totals exceeded `u32`.
    #[error("vehicle totals overflowed")]
    CountOverflow,
    /// Pricing the combination failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Lexicographic ranking key: fewer vehicles, then fewer unused seats, then
/// lower total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey {
    /// Total number of vehicles.
    pub vehicle_count: u32,
    /// Seats left empty.
    pub unused_seats: u32,
    /// Cost for the whole trip.
    pub total_cost: Decimal,
}

/// A priced allocation of vehicles able to seat a party.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use fleetfit_core::{AllocationEntry, VehicleCombination, VehicleType};
///
/// let van = VehicleType::new(3, "Van", 12, 10, Decimal::new(2500, 0)).unwrap();
/// let combination =
///     VehicleCombination::new(vec![AllocationEntry::new(&van, 1)], 10, Decimal::from(3)).unwrap();
///
/// assert_eq!(combination.unused_seats(), 2);
/// assert_eq!(combination.total_cost(), Decimal::new(7500, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VehicleCombination {
    vehicles: Vec<AllocationEntry>,
    total_vehicle_count: u32,
    total_capacity: u32,
    unused_seats: u32,
    cost_per_day: Decimal,
    total_cost: Decimal,
    num_days: Decimal,
    recommended: bool,
}

impl VehicleCombination {
    /// Validate and price a combination for `passenger_count` travellers.
    ///
    /// Entries are stored in ascending vehicle-type order. The combination
    /// starts out not recommended.
    pub fn new(
        mut vehicles: Vec<AllocationEntry>,
        passenger_count: u32,
        num_days: Decimal,
    ) -> Result<Self, CombinationError> {
        if vehicles.is_empty() {
            return Err(CombinationError::Empty);
        }
        vehicles.sort_by_key(|entry| entry.vehicle_type_id);

        let mut total_vehicle_count: u32 = 0;
        let mut total_capacity: u32 = 0;
        let mut previous: Option<VehicleTypeId> = None;
        for entry in &vehicles {
            if entry.count == 0 {
                return Err(CombinationError::ZeroCount {
                    id: entry.vehicle_type_id,
                });
            }
            if previous == Some(entry.vehicle_type_id) {
                return Err(CombinationError::DuplicateVehicleType {
                    id: entry.vehicle_type_id,
                });
            }
            previous = Some(entry.vehicle_type_id);
            total_vehicle_count = total_vehicle_count
                .checked_add(entry.count)
                .ok_or(CombinationError::CountOverflow)?;
            total_capacity = entry
                .capacity
                .checked_mul(entry.count)
                .and_then(|seats| total_capacity.checked_add(seats))
                .ok_or(CombinationError::CountOverflow)?;
        }

        let unused_seats = total_capacity.checked_sub(passenger_count).ok_or(
            CombinationError::InsufficientCapacity {
                capacity: total_capacity,
                passenger_count,
            },
        )?;
        let quote = price(&vehicles, num_days)?;

        Ok(Self {
            vehicles,
            total_vehicle_count,
            total_capacity,
            unused_seats,
            cost_per_day: quote.cost_per_day,
            total_cost: quote.total_cost,
            num_days,
            recommended: false,
        })
    }

    /// Allocated vehicles in ascending vehicle-type order.
    pub fn vehicles(&self) -> &[AllocationEntry] {
        &self.vehicles
    }

    /// Number of vehicles across all entries.
    pub const fn total_vehicle_count(&self) -> u32 {
        self.total_vehicle_count
    }

    /// Seats offered across all entries.
    pub const fn total_capacity(&self) -> u32 {
        self.total_capacity
    }

    /// Seats left empty once every passenger is seated.
    pub const fn unused_seats(&self) -> u32 {
        self.unused_seats
    }

    /// Daily cost of the combination.
    pub const fn cost_per_day(&self) -> Decimal {
        self.cost_per_day
    }

    /// Cost for the whole trip, billed in whole days.
    pub const fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Trip length as requested (before rounding).
    pub const fn num_days(&self) -> Decimal {
        self.num_days
    }

    /// Whether this combination is the top-ranked suggestion.
    pub const fn is_recommended(&self) -> bool {
        self.recommended
    }

    /// Flag or unflag the combination as the recommended choice.
    pub const fn set_recommended(&mut self, recommended: bool) {
        self.recommended = recommended;
    }

    /// Key used for lexicographic ranking and dominance checks.
    pub const fn rank_key(&self) -> RankKey {
        RankKey {
            vehicle_count: self.total_vehicle_count,
            unused_seats: self.unused_seats,
            total_cost: self.total_cost,
        }
    }

    /// `(vehicle type, count)` pairs in ascending vehicle-type order.
    ///
    /// Used to order combinations that tie on every ranking criterion.
    pub fn signature(&self) -> impl Iterator<Item = (VehicleTypeId, u32)> + '_ {
        self.vehicles
            .iter()
            .map(|entry| (entry.vehicle_type_id, entry.count))
    }
}
