//! Vehicle types offered by the fleet catalog.

use rust_decimal::Decimal;
use thiserror::Error;

/// Identifier of a [`VehicleType`] within a catalog.
pub type VehicleTypeId = u64;

/// A kind of vehicle that can be booked for a trip.
///
/// Luggage capacity is carried for display but never optimised over.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use fleetfit_core::VehicleType;
///
/// # fn main() -> Result<(), fleetfit_core::VehicleTypeError> {
/// let sedan = VehicleType::new(1, "Sedan", 4, 2, Decimal::new(1000, 0))?;
/// assert!(sedan.active);
/// assert_eq!(sedan.passenger_capacity, 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VehicleType {
    /// Unique identifier.
    pub id: VehicleTypeId,
    /// Display name, e.g. "Sedan".
    pub name: String,
    /// Occupants a single vehicle can carry.
    pub passenger_capacity: u32,
    /// Pieces of luggage a single vehicle can carry.
    pub luggage_capacity: u32,
    /// Base rental price for one vehicle and one day.
    pub price_per_day: Decimal,
    /// Whether the type may be offered to customers.
    pub active: bool,
}

/// Errors returned by [`VehicleType::new`] and [`VehicleType::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleTypeError {
    /// The display name was blank.
    #[error("vehicle type name must not be empty")]
    EmptyName,
    /// A vehicle must seat at least one passenger.
    #[error("passenger capacity must be at least 1")]
    ZeroCapacity,
    /// Daily prices cannot be negative.
    #[error("price per day must not be negative, got {price}")]
    NegativePrice {
        /// The rejected price.
        price: Decimal,
    },
}

impl VehicleType {
    /// Validate and construct an active [`VehicleType`].
    pub fn new(
        id: VehicleTypeId,
        name: impl Into<String>,
        passenger_capacity: u32,
        luggage_capacity: u32,
        price_per_day: Decimal,
    ) -> Result<Self, VehicleTypeError> {
        let vehicle_type = Self {
            id,
            name: name.into(),
            passenger_capacity,
            luggage_capacity,
            price_per_day,
            active: true,
        };
        vehicle_type.validate()?;
        Ok(vehicle_type)
    }

    /// Return a copy with the active flag replaced.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal::Decimal;
    /// use fleetfit_core::VehicleType;
    ///
    /// let van = VehicleType::new(3, "Van", 12, 10, Decimal::new(2500, 0))
    ///     .expect("valid vehicle type")
    ///     .with_active(false);
    /// assert!(!van.active);
    /// ```
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check the invariants that records loaded from storage may violate.
    pub fn validate(&self) -> Result<(), VehicleTypeError> {
        if self.name.trim().is_empty() {
            return Err(VehicleTypeError::EmptyName);
        }
        if self.passenger_capacity == 0 {
            return Err(VehicleTypeError::ZeroCapacity);
        }
        if self.price_per_day.is_sign_negative() && !self.price_per_day.is_zero() {
            return Err(VehicleTypeError::NegativePrice {
                price: self.price_per_day,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    fn new_vehicle_type_is_active() {
        let sedan = VehicleType::new(1, "Sedan", 4, 2, dec!(1000)).expect("valid sedan");
        assert!(sedan.active);
        assert_eq!(sedan.name, "Sedan");
    }

    #[rstest]
    #[case("", 4, dec!(1000), VehicleTypeError::EmptyName)]
    #[case("   ", 4, dec!(1000), VehicleTypeError::EmptyName)]
    #[case("Sedan", 0, dec!(1000), VehicleTypeError::ZeroCapacity)]
    #[case(
        "Sedan",
        4,
        dec!(-1),
        VehicleTypeError::NegativePrice { price: dec!(-1) }
    )]
    fn new_rejects_invalid_fields(
        #[case] name: &str,
        #[case] capacity: u32,
        #[case] price: Decimal,
        #[case] expected: VehicleTypeError,
    ) {
        let err = VehicleType::new(1, name, capacity, 0, price).expect_err("invalid input");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn zero_price_is_allowed() {
        assert!(VehicleType::new(9, "Shuttle", 20, 0, Decimal::ZERO).is_ok());
    }

    #[rstest]
    fn with_active_toggles_flag() {
        let suv = VehicleType::new(2, "SUV", 7, 4, dec!(1500))
            .expect("valid suv")
            .with_active(false);
        assert!(!suv.active);
        assert!(suv.with_active(true).active);
    }
}
