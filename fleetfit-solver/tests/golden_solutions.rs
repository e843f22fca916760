#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Golden solution regression tests for the combination solver.
//!
//! Each case loads a catalog and request from JSON, runs the solver, and
//! compares the ranked solutions with the recorded expectation.

use std::fs;
use std::path::PathBuf;

use fleetfit_core::test_support::MemoryCatalog;
use fleetfit_core::{OptimizeRequest, Optimizer, VehicleType, VehicleTypeId};
use fleetfit_solver::CombinationSolver;
use rstest::rstest;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Deserialised golden test case.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoldenCase {
    name: String,
    #[expect(dead_code, reason = "kept for documentation in JSON files")]
    description: String,
    vehicle_types: Vec<VehicleType>,
    request: OptimizeRequest,
    expected: Vec<ExpectedSolution>,
}

/// Expected solution from JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedSolution {
    vehicles: Vec<(VehicleTypeId, u32)>,
    unused_seats: u32,
    total_cost: Decimal,
}

fn load_golden_case(filename: &str) -> GoldenCase {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_solutions/data")
        .join(filename);
    let content = fs::read_to_string(&path).expect("failed to read golden case file");
    serde_json::from_str(&content).expect("failed to parse golden case JSON")
}

#[rstest]
#[case("mixed_fleet_ten_passengers.json")]
#[case("large_party_vans.json")]
#[case("single_passenger.json")]
#[case("van_retired.json")]
#[case("fractional_days.json")]
#[case("identical_twins.json")]
#[case("eight_passengers.json")]
fn golden_solution_regression(#[case] filename: &str) {
    let golden = load_golden_case(filename);
    let solver = CombinationSolver::new(MemoryCatalog::with_vehicle_types(golden.vehicle_types));

    let response = solver
        .optimize(&golden.request)
        .expect("golden case should optimise successfully");

    assert_eq!(
        response.solutions.len(),
        golden.expected.len(),
        "{}: solution count mismatch",
        golden.name
    );
    for (position, (actual, expected)) in response
        .solutions
        .iter()
        .zip(&golden.expected)
        .enumerate()
    {
        let vehicles: Vec<_> = actual.signature().collect();
        assert_eq!(
            vehicles, expected.vehicles,
            "{}: vehicles mismatch at position {position}",
            golden.name
        );
        assert_eq!(
            actual.unused_seats(),
            expected.unused_seats,
            "{}: unused seats mismatch at position {position}",
            golden.name
        );
        assert_eq!(
            actual.total_cost(),
            expected.total_cost,
            "{}: total cost mismatch at position {position}",
            golden.name
        );
        assert_eq!(
            actual.is_recommended(),
            position == 0,
            "{}: recommended flag mismatch at position {position}",
            golden.name
        );
    }
}
