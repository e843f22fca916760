//! Price calculation for vehicle allocations.
//!
//! Trips are billed in whole days: a fractional trip length is always rounded
//! up. The calculator is usable on its own so a booking step can re-price a
//! previously chosen allocation without running the search again.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::AllocationEntry;

/// Per-day and total cost of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PriceQuote {
    /// Sum of `price_per_day * count` over all entries.
    pub cost_per_day: Decimal,
    /// Trip length rounded up to whole days.
    pub billable_days: Decimal,
    /// `cost_per_day * billable_days`.
    pub total_cost: Decimal,
}

/// Errors returned by [`price`] and [`billable_days`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Trip length was zero or negative.
    #[error("number of days must be positive, got {num_days}")]
    NonPositiveDays {
        /// The rejected trip length.
        num_days: Decimal,
    },
    /// The cost exceeded the decimal range.
    #[error("cost calculation overflowed")]
    Overflow,
}

/// Round a trip length up to the number of days that will be billed.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use fleetfit_core::billable_days;
///
/// assert_eq!(billable_days(Decimal::new(15, 1)), Ok(Decimal::from(2)));
/// assert_eq!(billable_days(Decimal::from(3)), Ok(Decimal::from(3)));
/// ```
pub fn billable_days(num_days: Decimal) -> Result<Decimal, PricingError> {
    if num_days <= Decimal::ZERO {
        return Err(PricingError::NonPositiveDays { num_days });
    }
    Ok(num_days.ceil())
}

/// Compute the daily and total cost of `entries` for a trip of `num_days`.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use fleetfit_core::{AllocationEntry, VehicleType, price};
///
/// let van = VehicleType::new(3, "Van", 12, 10, Decimal::new(2500, 0)).unwrap();
/// let quote = price(&[AllocationEntry::new(&van, 1)], Decimal::from(3)).unwrap();
/// assert_eq!(quote.cost_per_day, Decimal::new(2500, 0));
/// assert_eq!(quote.total_cost, Decimal::new(7500, 0));
/// ```
pub fn price(entries: &[AllocationEntry], num_days: Decimal) -> Result<PriceQuote, PricingError> {
    let billable_days = billable_days(num_days)?;
    let cost_per_day = entries.iter().try_fold(Decimal::ZERO, |total, entry| {
        entry
            .price_per_day
            .checked_mul(Decimal::from(entry.count))
            .and_then(|line| total.checked_add(line))
            .ok_or(PricingError::Overflow)
    })?;
    let total_cost = cost_per_day
        .checked_mul(billable_days)
        .ok_or(PricingError::Overflow)?;
    Ok(PriceQuote {
        cost_per_day,
        billable_days,
        total_cost,
    })
}
