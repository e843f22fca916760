//! Optimisation requests and responses.

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::VehicleCombination;

/// Largest number of solutions a caller may ask for.
pub const MAX_SOLUTIONS_LIMIT: u32 = 20;

/// Number of solutions returned when the caller does not say.
pub const DEFAULT_MAX_SOLUTIONS: u32 = 5;

#[cfg(feature = "serde")]
const fn default_max_solutions() -> u32 {
    DEFAULT_MAX_SOLUTIONS
}

/// Accept any unsigned JSON integer so oversized limits reach validation.
#[cfg(feature = "serde")]
fn deserialize_max_solutions<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let wide = <u64 as serde::Deserialize>::deserialize(deserializer)?;
    Ok(u32::try_from(wide).unwrap_or(u32::MAX))
}

/// Parameters for an optimisation call.
///
/// # Examples
/// ```rust
/// use rust_decimal::Decimal;
/// use fleetfit_core::OptimizeRequest;
///
/// let request = OptimizeRequest::new(10, Decimal::from(3)).with_max_solutions(3);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizeRequest {
    /// Travellers who need a seat.
    pub passenger_count: u32,
    /// Trip length in days; fractions are billed as whole days.
    pub num_days: Decimal,
    /// Upper bound on returned solutions, within `1..=20`.
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "default_max_solutions",
            deserialize_with = "deserialize_max_solutions"
        )
    )]
    pub max_solutions: u32,
}

/// Detailed validation failures for [`OptimizeRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptimizeRequestValidationError {
    /// At least one passenger is required.
    #[error("passenger count must be at least 1")]
    ZeroPassengers,
    /// The trip must last a positive number of days.
    #[error("number of days must be positive, got {num_days}")]
    NonPositiveDays {
        /// The rejected trip length.
        num_days: Decimal,
    },
    /// `max_solutions` was outside `1..=20`.
    #[error("max solutions must be between 1 and {MAX_SOLUTIONS_LIMIT}, got {max_solutions}")]
    MaxSolutionsOutOfRange {
        /// The rejected limit, saturated at `u32::MAX`.
        max_solutions: u32,
    },
}

impl OptimizeRequest {
    /// Construct a request returning [`DEFAULT_MAX_SOLUTIONS`] solutions.
    pub const fn new(passenger_count: u32, num_days: Decimal) -> Self {
        Self {
            passenger_count,
            num_days,
            max_solutions: DEFAULT_MAX_SOLUTIONS,
        }
    }

    /// Replace the solution limit.
    #[must_use]
    pub const fn with_max_solutions(mut self, max_solutions: u32) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    /// Validate the request, mapping failures to [`crate::OptimizeError`].
    pub fn validate(&self) -> Result<(), crate::OptimizeError> {
        self.validate_detailed()
            .map_err(crate::OptimizeError::InvalidRequest)
    }

    /// Validate the request and report which field is wrong.
    pub fn validate_detailed(&self) -> Result<(), OptimizeRequestValidationError> {
        if self.passenger_count == 0 {
            return Err(OptimizeRequestValidationError::ZeroPassengers);
        }
        if self.num_days <= Decimal::ZERO {
            return Err(OptimizeRequestValidationError::NonPositiveDays {
                num_days: self.num_days,
            });
        }
        if !(1..=MAX_SOLUTIONS_LIMIT).contains(&self.max_solutions) {
            return Err(OptimizeRequestValidationError::MaxSolutionsOutOfRange {
                max_solutions: self.max_solutions,
            });
        }
        Ok(())
    }
}

/// Search statistics recorded for one optimisation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Wall-clock time spent answering the request.
    pub solve_time: Duration,
    /// Search tree nodes visited by the generator.
    pub nodes_explored: u64,
    /// Capacity-satisfying combinations produced by the generator.
    pub candidates_generated: u64,
    /// Candidates removed by the dominance filter.
    pub candidates_dominated: u64,
}

/// Ranked solutions for an [`OptimizeRequest`].
///
/// Diagnostics stay in memory and are not serialised.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizeResponse {
    /// Echo of the requested passenger count.
    pub passenger_count: u32,
    /// Echo of the requested trip length.
    pub num_days: Decimal,
    /// Solutions ordered best first.
    pub solutions: Vec<VehicleCombination>,
    /// Search statistics.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub diagnostics: Diagnostics,
}

impl OptimizeResponse {
    /// The solution flagged as recommended, if any.
    pub fn recommended(&self) -> Option<&VehicleCombination> {
        self.solutions
            .iter()
            .find(|solution| solution.is_recommended())
    }
}
