//! Ordering and truncation of surviving combinations.

use std::cmp::Ordering;

use fleetfit_core::VehicleCombination;

/// Sort best first, keep at most `max_solutions`, and flag the first one as
/// recommended.
///
/// Combinations are ordered by vehicle count, then unused seats, then total
/// cost. Remaining ties fall back to the `(vehicle type, count)` sequence so
/// the output never depends on input order.
#[must_use]
pub fn rank(
    mut combinations: Vec<VehicleCombination>,
    max_solutions: u32,
) -> Vec<VehicleCombination> {
    combinations.sort_by(compare);
    combinations.truncate(usize::try_from(max_solutions).unwrap_or(usize::MAX));
    for (position, combination) in combinations.iter_mut().enumerate() {
        combination.set_recommended(position == 0);
    }
    combinations
}

fn compare(lhs: &VehicleCombination, rhs: &VehicleCombination) -> Ordering {
    lhs.rank_key()
        .cmp(&rhs.rank_key())
        .then_with(|| lhs.signature().cmp(rhs.signature()))
}
