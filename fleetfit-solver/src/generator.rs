//! Depth-first enumeration of vehicle combinations.
//!
//! Vehicle types are visited in ascending identifier order. At each type the
//! search tries every count from zero up to the number of vehicles of that
//! type needed to seat the whole party on its own. A branch becomes a leaf as
//! soon as its capacity covers the party; nothing beneath a leaf is explored.
//!
//! Only partial branches are pruned: one is abandoned when its vehicle count
//! strictly exceeds the smallest vehicle count among leaves found so far. A
//! leaf is recorded whatever its count, so a partial branch sitting on the
//! best count may still add one more vehicle and complete.

use fleetfit_core::{AllocationEntry, CatalogSnapshot, VehicleType};

use crate::budget::{BudgetExhausted, SearchBudget};

/// Leaves produced by one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Capacity-satisfying allocations, each in ascending vehicle-type order.
    pub candidates: Vec<Vec<AllocationEntry>>,
    /// Search tree nodes visited.
    pub nodes_explored: u64,
}

/// Enumerate the allocations of `snapshot` able to seat `passenger_count`.
///
/// # Errors
/// Returns [`BudgetExhausted`] when `budget` stops the search early.
///
/// # Examples
/// ```rust
/// use rust_decimal::Decimal;
/// use fleetfit_core::{CatalogSnapshot, VehicleType};
/// use fleetfit_solver::{SearchBudget, generate};
///
/// let van = VehicleType::new(3, "Van", 12, 10, Decimal::new(2500, 0)).unwrap();
/// let snapshot = CatalogSnapshot::from_vehicle_types([van]).unwrap();
///
/// let generation = generate(&snapshot, 20, &mut SearchBudget::unlimited()).unwrap();
/// assert_eq!(generation.candidates.len(), 1);
/// assert_eq!(generation.candidates[0][0].count, 2);
/// ```
pub fn generate(
    snapshot: &CatalogSnapshot,
    passenger_count: u32,
    budget: &mut SearchBudget<'_>,
) -> Result<Generation, BudgetExhausted> {
    let mut search = Search {
        vehicle_types: snapshot.vehicle_types(),
        passenger_count,
        budget,
        best_vehicle_count: u32::MAX,
        path: Vec::with_capacity(snapshot.len()),
        candidates: Vec::new(),
        nodes_explored: 0,
    };
    search.visit(0, 0, 0)?;
    log::debug!(
        "generated {} candidates from {} nodes",
        search.candidates.len(),
        search.nodes_explored
    );
    Ok(Generation {
        candidates: search.candidates,
        nodes_explored: search.nodes_explored,
    })
}

struct Search<'s, 'b> {
    vehicle_types: &'s [VehicleType],
    passenger_count: u32,
    budget: &'s mut SearchBudget<'b>,
    best_vehicle_count: u32,
    path: Vec<(&'s VehicleType, u32)>,
    candidates: Vec<Vec<AllocationEntry>>,
    nodes_explored: u64,
}

impl<'s> Search<'s, '_> {
    fn visit(&mut self, depth: usize, vehicles: u32, capacity: u64) -> Result<(), BudgetExhausted> {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.budget.on_node()?;

        let required = u64::from(self.passenger_count);
        if capacity >= required {
            self.record_leaf(vehicles);
            return Ok(());
        }
        if vehicles > self.best_vehicle_count {
            return Ok(());
        }
        let Some(vehicle_type) = self.vehicle_types.get(depth) else {
            return Ok(());
        };

        let seats = u64::from(vehicle_type.passenger_capacity);
        let upper = self
            .passenger_count
            .div_ceil(vehicle_type.passenger_capacity.max(1));
        for count in 0..=upper {
            let next_vehicles = vehicles.saturating_add(count);
            let next_capacity = capacity.saturating_add(seats.saturating_mul(u64::from(count)));

            if count > 0 {
                self.path.push((vehicle_type, count));
            }
            let outcome = self.visit(depth.saturating_add(1), next_vehicles, next_capacity);
            if count > 0 {
                self.path.pop();
            }
            outcome?;

            if next_capacity >= required {
                break;
            }
        }
        Ok(())
    }

    fn record_leaf(&mut self, vehicles: u32) {
        self.best_vehicle_count = self.best_vehicle_count.min(vehicles);
        self.candidates.push(
            self.path
                .iter()
                .map(|&(vehicle_type, count)| AllocationEntry::new(vehicle_type, count))
                .collect(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetfit_core::test_support::{sample_fleet, sedan, suv};
    use rstest::rstest;

    fn signatures(generation: &Generation) -> Vec<Vec<(u64, u32)>> {
        generation
            .candidates
            .iter()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| (entry.vehicle_type_id, entry.count))
                    .collect()
            })
            .collect()
    }

    fn run(vehicle_types: Vec<VehicleType>, passengers: u32) -> Generation {
        let snapshot = CatalogSnapshot::from_vehicle_types(vehicle_types).expect("snapshot");
        generate(&snapshot, passengers, &mut SearchBudget::unlimited()).expect("generate")
    }

    #[rstest]
    fn partial_branches_on_the_best_count_may_still_complete() {
        let generation = run(sample_fleet(), 10);
        assert_eq!(
            signatures(&generation),
            vec![
                vec![(3, 1)],
                vec![(2, 1), (3, 1)],
                vec![(2, 2)],
                vec![(1, 1), (3, 1)],
                vec![(1, 1), (2, 1)],
                vec![(1, 3)],
            ]
        );
    }

    #[rstest]
    fn partial_branches_beyond_the_best_count_are_abandoned() {
        let generation = run(sample_fleet(), 8);
        let sizes: Vec<u32> = generation
            .candidates
            .iter()
            .map(|entries| entries.iter().map(|entry| entry.count).sum())
            .collect();
        assert_eq!(sizes, vec![1, 2, 2, 2, 2, 2]);
        assert!(signatures(&generation).contains(&vec![(1, 2)]));
    }

    #[rstest]
    fn ties_on_best_vehicle_count_are_kept() {
        let generation = run(vec![sedan(), suv()], 10);
        assert_eq!(
            signatures(&generation),
            vec![
                vec![(2, 2)],
                vec![(1, 1), (2, 1)],
                vec![(1, 2), (2, 1)],
                vec![(1, 3)],
            ]
        );
    }

    #[rstest]
    fn single_passenger_gets_one_vehicle_of_each_type() {
        let generation = run(sample_fleet(), 1);
        assert_eq!(
            signatures(&generation),
            vec![vec![(3, 1)], vec![(2, 1)], vec![(1, 1)]]
        );
    }

    #[rstest]
    fn every_candidate_seats_the_party() {
        let generation = run(sample_fleet(), 37);
        assert!(!generation.candidates.is_empty());
        for entries in &generation.candidates {
            let seats: u32 = entries
                .iter()
                .map(|entry| entry.capacity * entry.count)
                .sum();
            assert!(seats >= 37);
        }
    }

    #[rstest]
    fn empty_snapshot_yields_no_candidates() {
        let generation = run(Vec::new(), 4);
        assert!(generation.candidates.is_empty());
        assert_eq!(generation.nodes_explored, 1);
    }

    #[rstest]
    fn interrupted_search_reports_cancellation() {
        let flag = std::sync::atomic::AtomicBool::new(true);
        let snapshot = CatalogSnapshot::from_vehicle_types(sample_fleet()).expect("snapshot");
        let mut budget = SearchBudget::new(None, 0, Some(&flag));
        let err = generate(&snapshot, 10, &mut budget).expect_err("interrupted");
        assert_eq!(err, BudgetExhausted::Interrupted);
    }
}
