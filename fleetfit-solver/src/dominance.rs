//! Pareto filtering over vehicle count, unused seats and total cost.

use fleetfit_core::{RankKey, VehicleCombination};

/// Whether `a` is at least as good as `b` on every criterion and strictly
/// better on one.
///
/// Combinations equal on all three criteria do not dominate each other.
///
/// # Examples
/// ```rust
/// use rust_decimal::Decimal;
/// use fleetfit_core::RankKey;
/// use fleetfit_solver::dominates;
///
/// let van = RankKey { vehicle_count: 1, unused_seats: 2, total_cost: Decimal::from(7500) };
/// let suvs = RankKey { vehicle_count: 2, unused_seats: 4, total_cost: Decimal::from(9000) };
/// assert!(dominates(&van, &suvs));
/// assert!(!dominates(&van, &van));
/// ```
#[must_use]
pub fn dominates(a: &RankKey, b: &RankKey) -> bool {
    a.vehicle_count <= b.vehicle_count
        && a.unused_seats <= b.unused_seats
        && a.total_cost <= b.total_cost
        && a != b
}

/// Remove every combination dominated by another one in the set.
///
/// Survivors keep their input order.
#[must_use]
pub fn filter_dominated(combinations: Vec<VehicleCombination>) -> Vec<VehicleCombination> {
    let keys: Vec<RankKey> = combinations
        .iter()
        .map(VehicleCombination::rank_key)
        .collect();
    combinations
        .into_iter()
        .zip(&keys)
        .filter(|(_, candidate)| !keys.iter().any(|other| dominates(other, candidate)))
        .map(|(combination, _)| combination)
        .collect()
}
